//! Indentation-based block extraction.
//!
//! Chart sources are templates, not YAML, so structural lookups work on raw
//! lines: a block is every line after `key:` that is indented deeper than
//! the key itself, ending at the first blank line or the first line at the
//! same or a lesser indentation. A key may instead carry an inline flow
//! mapping (`key: {a: b}`).

use std::collections::BTreeMap;

/// A `key:` line and the lines nested under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentedBlock<'a> {
    /// 0-indexed line of the `key:` header.
    pub header: usize,
    /// Indentation of the header line.
    pub indent: usize,
    /// Lines nested under the header.
    pub body: &'a [&'a str],
    /// Inline value after `key:` when it is not empty.
    pub inline: Option<&'a str>,
}

impl<'a> IndentedBlock<'a> {
    /// 0-indexed line range covered by the body.
    pub fn body_range(&self) -> (usize, usize) {
        (self.header + 1, self.header + 1 + self.body.len())
    }

    /// `key: value` pairs of the block.
    ///
    /// Inline flow mappings are parsed from the header; otherwise every body
    /// line containing a `:` contributes one pair (nested keys included).
    pub fn pairs(&self) -> BTreeMap<String, String> {
        match self.inline {
            Some(inline) => parse_flow_mapping(inline),
            None => parse_pairs(self.body),
        }
    }
}

/// Width of the leading whitespace of a line.
pub fn indentation(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Lines nested under the header at `header`.
pub fn capture<'a>(lines: &'a [&'a str], header: usize) -> &'a [&'a str] {
    let Some(first) = lines.get(header) else {
        return &[];
    };
    let base = indentation(first);
    let start = header + 1;
    let mut end = start;

    while end < lines.len() {
        let line = lines[end];
        if line.trim().is_empty() || indentation(line) <= base {
            break;
        }
        end += 1;
    }

    &lines[start..end]
}

/// Inline value if `line` is a `key:` header, `None` when it is not.
///
/// Returns `Some("")` for a bare `key:` header.
fn header_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.trim_start().strip_prefix(key)?.strip_prefix(':')?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim();
    if rest.starts_with('#') {
        return Some("");
    }
    Some(rest)
}

/// First `key:` header within `lines[from..to]`.
pub fn find_key(lines: &[&str], key: &str, from: usize, to: usize) -> Option<usize> {
    let to = to.min(lines.len());
    (from..to).find(|&i| header_value(lines[i], key).is_some())
}

/// First block introduced by `key:` anywhere in the lines.
pub fn find_block<'a>(lines: &'a [&'a str], key: &str) -> Option<IndentedBlock<'a>> {
    find_block_in(lines, key, 0, lines.len())
}

fn find_block_in<'a>(
    lines: &'a [&'a str],
    key: &str,
    from: usize,
    to: usize,
) -> Option<IndentedBlock<'a>> {
    let header = find_key(lines, key, from, to)?;
    let value = header_value(lines[header], key).unwrap_or_default();
    let inline = if value.is_empty() { None } else { Some(value) };
    let body = if inline.is_some() {
        &lines[header + 1..header + 1]
    } else {
        capture(lines, header)
    };

    Some(IndentedBlock {
        header,
        indent: indentation(lines[header]),
        body,
        inline,
    })
}

/// Follow a chain of keys, each looked up inside the previous block.
///
/// `find_path(lines, &["spec", "template", "metadata", "labels"])` finds the
/// pod template labels of a Deployment.
pub fn find_path<'a>(lines: &'a [&'a str], path: &[&str]) -> Option<IndentedBlock<'a>> {
    let (mut from, mut to) = (0, lines.len());
    let mut found = None;

    for key in path {
        let block = find_block_in(lines, key, from, to)?;
        (from, to) = block.body_range();
        found = Some(block);
    }

    found
}

/// Parse `key: value` lines, splitting on the first colon.
pub fn parse_pairs(lines: &[&str]) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();
    for line in lines {
        let clean = line.trim();
        if clean.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = clean.split_once(':') {
            pairs.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    pairs
}

/// Parse a one-line flow mapping such as `{app: foo, tier: web}`.
pub fn parse_flow_mapping(value: &str) -> BTreeMap<String, String> {
    let Some(inner) = value
        .trim()
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
    else {
        return BTreeMap::new();
    };

    inner
        .split(',')
        .filter_map(|entry| entry.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}
