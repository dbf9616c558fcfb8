//! Bracketed range expansion for host names and ports
//!
//! # Grammar
//!
//! ```text
//! pattern := head "[" from ":" to "]" tail
//! from    := digit+
//! to      := digit+
//! ```
//!
//! `head` and `tail` must not contain brackets: only a single range group is
//! honoured. A pattern that does not match, or whose range is inverted, is
//! used literally. Numbers are zero padded to the width of the `from` literal,
//! so `host-[01:03]` yields `host-01`, `host-02`, `host-03`.
//!
//! # Usage
//!
//! ```
//! use sctl_core::pattern::{expand_host_pattern, expand_port_pattern};
//!
//! assert_eq!(expand_host_pattern("h[8:10]"), vec!["h8", "h9", "h10"]);
//! assert_eq!(expand_port_pattern(4444, "444[5:6]"), vec![4445, 4446]);
//! ```

use tracing::warn;

/// Longest range a single pattern may expand to.
pub const MAX_RANGE_LEN: u64 = 1 << 16;

/// A single well-formed `head[from:to]tail` range with `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RangePattern<'a> {
    head: &'a str,
    from: u64,
    to: u64,
    width: usize,
    tail: &'a str,
}

impl<'a> RangePattern<'a> {
    fn parse(pattern: &'a str) -> Option<Self> {
        let open = pattern.find('[')?;
        let close = open + pattern[open..].find(']')?;

        let head = &pattern[..open];
        let tail = &pattern[close + 1..];
        if head.contains(['[', ']']) || tail.contains(['[', ']']) {
            return None;
        }

        let (from_lit, to_lit) = pattern[open + 1..close].split_once(':')?;
        if !is_digits(from_lit) || !is_digits(to_lit) {
            return None;
        }
        let from: u64 = from_lit.parse().ok()?;
        let to: u64 = to_lit.parse().ok()?;
        if from > to {
            return None;
        }

        Some(Self {
            head,
            from,
            to,
            width: from_lit.len(),
            tail,
        })
    }

    fn len(&self) -> u64 {
        (self.to - self.from).saturating_add(1)
    }

    fn render(&self, i: u64) -> String {
        format!("{}{:0width$}{}", self.head, i, self.tail, width = self.width)
    }

    fn upper(&self) -> String {
        self.render(self.to)
    }

    fn expand(self) -> impl Iterator<Item = String> + 'a {
        (self.from..=self.to).map(move |i| self.render(i))
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Expand a host pattern into concrete host names.
///
/// Never fails: anything that is not a single valid range comes back as a
/// one-element list holding the pattern itself. Ranges longer than
/// [`MAX_RANGE_LEN`] are also taken literally.
pub fn expand_host_pattern(pattern: &str) -> Vec<String> {
    match RangePattern::parse(pattern) {
        Some(range) if range.len() <= MAX_RANGE_LEN => range.expand().collect(),
        Some(range) => {
            warn!(pattern, len = range.len(), "range too long, using pattern literally");
            vec![pattern.to_string()]
        }
        None => vec![pattern.to_string()],
    }
}

/// Expand a port pattern relative to `base_port`.
///
/// An empty pattern yields `[base_port]`. Otherwise the pattern is expanded
/// like a host pattern and every piece must parse as a port; if any piece
/// does not, the result is empty. Range bounds are checked before expansion.
pub fn expand_port_pattern(base_port: u16, pattern: &str) -> Vec<u16> {
    if pattern.is_empty() {
        return vec![base_port];
    }

    let parsed = match RangePattern::parse(pattern) {
        // Values grow with the range index, so the upper bound decides the rest.
        Some(range) => range
            .upper()
            .parse::<u16>()
            .and_then(|_| range.expand().map(|piece| piece.parse::<u16>()).collect()),
        None => pattern.parse::<u16>().map(|port| vec![port]),
    };

    match parsed {
        Ok(ports) => ports,
        Err(e) => {
            warn!(pattern, error = %e, "port pattern yields no ports");
            Vec::new()
        }
    }
}
