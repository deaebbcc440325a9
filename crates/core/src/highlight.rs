//! Class-based syntax highlighting for fenced code blocks.
//!
//! Token spans carry `hl-` prefixed scope classes; the colors live in the
//! bundled stylesheets, so the same markup works for both themes.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::error::Result;

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Languages emitted verbatim so client-side renderers can pick them up.
const PASSTHROUGH_LANGUAGES: &[&str] = &["mermaid"];

pub struct Highlighter {
    syntaxes: SyntaxSet,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Renders one code block as a complete `<pre>` element.
    ///
    /// Blocks without a language, with an unknown language, or with a
    /// pass-through language are escaped but not highlighted.
    pub fn render_block(&self, code: &str, language: Option<&str>) -> Result<String> {
        let Some(language) = language.filter(|lang| !lang.is_empty()) else {
            return Ok(format!("<pre><code>{}</code></pre>\n", escape_html(code)));
        };

        let syntax = if PASSTHROUGH_LANGUAGES.contains(&language) {
            None
        } else {
            self.syntaxes.find_syntax_by_token(language)
        };

        let Some(syntax) = syntax else {
            return Ok(format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                escape_html(language),
                escape_html(code)
            ));
        };

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(format!(
            "<pre class=\"highlight\"><code class=\"language-{}\">{}</code></pre>\n",
            escape_html(language),
            generator.finalize()
        ))
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
