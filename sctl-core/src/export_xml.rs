use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::compiled::{
    CompiledBrowser, CompiledDocument, CompiledHost, CompiledRegion, CompiledVersion,
};
use crate::error::ExportError;

/// Namespace of the grid router quota schema.
pub const NAMESPACE: &str = "urn:config.gridrouter.qatools.ru";

const ROOT_TAG: &str = "qa:browsers";
const INDENT_SIZE: usize = 4;

type WriteResult = Result<(), String>;

/// Render a compiled document as grid router XML.
///
/// Output is indented by four spaces and has no XML declaration. Optional
/// attributes are left out when unset; elements without children are written
/// as empty elements.
pub fn document_to_xml(name: &str, document: &CompiledDocument) -> Result<String, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    write_document(&mut writer, document).map_err(|message| ExportError::Xml {
        name: name.to_string(),
        message,
    })?;

    String::from_utf8(writer.into_inner()).map_err(|source| ExportError::Utf8 {
        name: name.to_string(),
        source,
    })
}

fn write_document(w: &mut Writer<Vec<u8>>, document: &CompiledDocument) -> WriteResult {
    let mut root = BytesStart::new(ROOT_TAG);
    root.push_attribute(("xmlns:qa", NAMESPACE));

    open(w, root, document.browsers.is_empty())?;
    if document.browsers.is_empty() {
        return Ok(());
    }
    for browser in &document.browsers {
        write_browser(w, browser)?;
    }
    close(w, ROOT_TAG)
}

fn write_browser(w: &mut Writer<Vec<u8>>, browser: &CompiledBrowser) -> WriteResult {
    let mut start = BytesStart::new("browser");
    start.push_attribute(("name", browser.name.as_str()));
    start.push_attribute(("defaultVersion", browser.default_version.as_str()));
    optional_attr(&mut start, "defaultPlatform", browser.default_platform.as_deref());

    open(w, start, browser.versions.is_empty())?;
    if browser.versions.is_empty() {
        return Ok(());
    }
    for version in &browser.versions {
        write_version(w, version)?;
    }
    close(w, "browser")
}

fn write_version(w: &mut Writer<Vec<u8>>, version: &CompiledVersion) -> WriteResult {
    let mut start = BytesStart::new("version");
    start.push_attribute(("number", version.number.as_str()));
    optional_attr(&mut start, "platform", version.platform.as_deref());

    open(w, start, version.regions.is_empty())?;
    if version.regions.is_empty() {
        return Ok(());
    }
    for region in &version.regions {
        write_region(w, region)?;
    }
    close(w, "version")
}

fn write_region(w: &mut Writer<Vec<u8>>, region: &CompiledRegion) -> WriteResult {
    let mut start = BytesStart::new("region");
    start.push_attribute(("name", region.name.as_str()));

    open(w, start, region.hosts.is_empty())?;
    if region.hosts.is_empty() {
        return Ok(());
    }
    for host in &region.hosts {
        write_host(w, host)?;
    }
    close(w, "region")
}

fn write_host(w: &mut Writer<Vec<u8>>, host: &CompiledHost) -> WriteResult {
    let mut start = BytesStart::new("host");
    start.push_attribute(("name", host.name.as_str()));
    start.push_attribute(("port", host.port.to_string().as_str()));
    start.push_attribute(("count", host.count.to_string().as_str()));
    optional_attr(&mut start, "username", host.username.as_deref());
    optional_attr(&mut start, "password", host.password.as_deref());
    optional_attr(&mut start, "vnc", host.vnc.as_deref());

    emit(w, Event::Empty(start))
}

fn optional_attr(start: &mut BytesStart<'_>, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        start.push_attribute((key, value));
    }
}

fn open(w: &mut Writer<Vec<u8>>, start: BytesStart<'_>, empty: bool) -> WriteResult {
    if empty {
        emit(w, Event::Empty(start))
    } else {
        emit(w, Event::Start(start))
    }
}

fn close(w: &mut Writer<Vec<u8>>, tag: &str) -> WriteResult {
    emit(w, Event::End(BytesEnd::new(tag)))
}

fn emit(w: &mut Writer<Vec<u8>>, event: Event<'_>) -> WriteResult {
    w.write_event(event).map_err(|e| e.to_string())
}
