//! Feature detection on the markdown source and selection of the auxiliary
//! initializer scripts that go with it.

use crate::assets::{DIAGRAM_SCRIPT, MATH_SCRIPT, THEME_TOKEN};
use crate::options::{ConversionOptions, Theme};

const DIAGRAM_LANGUAGE: &str = "mermaid";

/// Mermaid preset for a page theme.
pub fn diagram_theme(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "dark",
        Theme::Light => "default",
    }
}

/// True when `body` contains a fenced block tagged `mermaid`.
///
/// This is a textual scan, not a parse. A line counts when, after any
/// indentation, blockquote `>` markers and list markers, it opens with three
/// or more backticks or tildes and an info string whose first word is the
/// diagram language. Indentation is not capped, so fences nested in list
/// items are found too.
pub fn has_diagram_fence(body: &str) -> bool {
    body.lines().any(|line| {
        let line = strip_container_markers(line);

        let Some(fence) = line.chars().next().filter(|c| *c == '`' || *c == '~') else {
            return false;
        };
        let info = line.trim_start_matches(fence);
        if line.len() - info.len() < 3 {
            return false;
        }

        info.split_whitespace()
            .next()
            .is_some_and(|lang| lang.eq_ignore_ascii_case(DIAGRAM_LANGUAGE))
    })
}

/// Drops leading whitespace, `>` quote markers and `-`/`*`/`+`/`1.`/`1)`
/// list markers, in any nesting.
fn strip_container_markers(line: &str) -> &str {
    let mut rest = line;
    loop {
        let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '>');
        let after_marker = list_marker_len(trimmed).map(|len| &trimmed[len..]);
        match after_marker {
            Some(next) if next.starts_with([' ', '\t']) => rest = next,
            _ => return trimmed,
        }
    }
}

fn list_marker_len(line: &str) -> Option<usize> {
    if line.starts_with(['-', '*', '+']) {
        return Some(1);
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    (digits > 0 && line[digits..].starts_with(['.', ')'])).then_some(digits + 1)
}

/// True when `body` contains any `$`. Single-dollar inline math counts, as
/// does an unpaired `$$`.
pub fn has_math_marker(body: &str) -> bool {
    body.contains('$')
}

/// Scripts to attach for `body`: diagram first, then math.
///
/// `body` must be the markdown source, not the rendered HTML.
pub fn select_scripts(body: &str, options: &ConversionOptions) -> Vec<String> {
    let mut scripts = Vec::new();

    if options.enable_diagrams && has_diagram_fence(body) {
        scripts.push(DIAGRAM_SCRIPT.replacen(THEME_TOKEN, diagram_theme(options.theme), 1));
    }

    if options.enable_math && has_math_marker(body) {
        scripts.push(MATH_SCRIPT.to_owned());
    }

    scripts
}
