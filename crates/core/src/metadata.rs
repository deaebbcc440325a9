//! Leading YAML frontmatter extraction.
//!
//! A document may open with a block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Release notes
//! tags: [changelog, v2]
//! ---
//! # Body starts here
//! ```
//!
//! Extraction never fails. A missing, unterminated or unparsable block leaves
//! the caller with empty metadata and the default title, but [`Frontmatter`]
//! still tells the cases apart.

use std::collections::BTreeMap;

use serde_yaml::Value;

pub const DEFAULT_TITLE: &str = "Document";

const DELIMITER: &str = "---";

/// Parsed frontmatter keys. Ordered so rendered output is deterministic.
pub type Metadata = BTreeMap<String, Value>;

/// What was found at the start of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Frontmatter {
    /// The input does not begin with a delimiter line.
    Absent,
    /// An opening delimiter without a closing one; the whole input is body.
    Unterminated,
    /// A delimited block that parsed into a mapping.
    Parsed(Metadata),
    /// A delimited block whose content is not a valid YAML mapping.
    Malformed(String),
}

/// Result of [`extract`]: the frontmatter outcome and the remaining body.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<'a> {
    pub frontmatter: Frontmatter,
    pub body: &'a str,
}

impl Extracted<'_> {
    /// Metadata to expose downstream; empty unless the block parsed.
    pub fn metadata(&self) -> Metadata {
        match &self.frontmatter {
            Frontmatter::Parsed(metadata) => metadata.clone(),
            _ => Metadata::new(),
        }
    }

    /// The `title` key, when present and a string.
    pub fn title(&self) -> Option<&str> {
        match &self.frontmatter {
            Frontmatter::Parsed(metadata) => metadata.get("title").and_then(Value::as_str),
            _ => None,
        }
    }

    pub fn title_or_default(&self) -> &str {
        self.title().unwrap_or(DEFAULT_TITLE)
    }
}

/// Splits an optional frontmatter block from `source`.
///
/// The body excludes both delimiter lines and their line terminators; every
/// other byte is preserved.
pub fn extract(source: &str) -> Extracted<'_> {
    let Some(after_open) = strip_opening_delimiter(source) else {
        return Extracted {
            frontmatter: Frontmatter::Absent,
            body: source,
        };
    };

    let Some((header, body)) = split_at_closing_delimiter(after_open) else {
        return Extracted {
            frontmatter: Frontmatter::Unterminated,
            body: source,
        };
    };

    Extracted {
        frontmatter: parse_header(header),
        body,
    }
}

fn strip_opening_delimiter(source: &str) -> Option<&str> {
    let rest = source.strip_prefix(DELIMITER)?;
    rest.strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))
}

/// Finds the first line consisting solely of `---` and returns the text
/// before it and the text after its terminator.
fn split_at_closing_delimiter(text: &str) -> Option<(&str, &str)> {
    let mut line_start = 0;
    while line_start <= text.len() {
        let (line_end, next_start) = match text[line_start..].find('\n') {
            Some(offset) => (line_start + offset, line_start + offset + 1),
            None => (text.len(), text.len()),
        };

        let line = &text[line_start..line_end];
        if line.strip_suffix('\r').unwrap_or(line) == DELIMITER {
            return Some((&text[..line_start], &text[next_start..]));
        }

        if next_start == line_end {
            // last line, no terminator
            return None;
        }
        line_start = next_start;
    }
    None
}

fn parse_header(header: &str) -> Frontmatter {
    if header.trim().is_empty() {
        return Frontmatter::Parsed(Metadata::new());
    }

    match serde_yaml::from_str::<Option<Metadata>>(header) {
        Ok(metadata) => Frontmatter::Parsed(metadata.unwrap_or_default()),
        Err(err) => Frontmatter::Malformed(err.to_string()),
    }
}
