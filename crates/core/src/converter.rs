//! The document assembly pipeline.
//!
//! ```text
//! bytes ─▶ extract ─▶ protect ─▶ markdown ─▶ restore ─▶ select_scripts ─▶ assemble ─▶ template ─▶ bytes
//! ```
//!
//! Stages run strictly in that order. Script selection reads the body as
//! extracted, before math protection. The math span store is created inside
//! each call, so a single [`Converter`] can serve concurrent conversions.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::document::{DocumentModel, assemble};
use crate::error::{Error, Result};
use crate::markdown::{MarkdownRenderer, PulldownRenderer};
use crate::math::{self, MathSpans};
use crate::metadata::{self, Frontmatter};
use crate::options::ConversionOptions;
use crate::scripts::select_scripts;
use crate::template::{PageTemplate, TemplateRenderer};

pub struct Converter<M = PulldownRenderer, T = PageTemplate> {
    options: ConversionOptions,
    markdown: M,
    template: T,
}

impl Converter {
    /// A converter with the bundled markdown renderer and page template.
    pub fn new(options: ConversionOptions) -> Self {
        Self::with_renderers(options, PulldownRenderer::new(), PageTemplate::new())
    }
}

impl<M, T> Converter<M, T>
where
    M: MarkdownRenderer,
    T: TemplateRenderer,
{
    pub fn with_renderers(options: ConversionOptions, markdown: M, template: T) -> Self {
        Self {
            options,
            markdown,
            template,
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Converts raw document bytes into page bytes. Invalid UTF-8 is
    /// replaced, not rejected.
    pub fn convert(&self, raw: &[u8]) -> Result<Vec<u8>> {
        let source = String::from_utf8_lossy(raw);
        self.convert_str(&source).map(String::into_bytes)
    }

    pub fn convert_str(&self, source: &str) -> Result<String> {
        let document = self.build_document(source)?;
        self.template.render(&document)
    }

    /// Reads `input`, converts it and writes the page to `output`. Nothing is
    /// written when any stage fails.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<()> {
        let raw = fs::read(input).map_err(|err| Error::io(input, err))?;
        let page = self.convert(&raw)?;
        fs::write(output, page).map_err(|err| Error::io(output, err))?;
        debug!(input = %input.display(), output = %output.display(), "page written");
        Ok(())
    }

    /// Runs every stage up to, not including, the template.
    pub fn build_document(&self, source: &str) -> Result<DocumentModel> {
        let extracted = metadata::extract(source);
        match &extracted.frontmatter {
            Frontmatter::Absent => debug!("no frontmatter"),
            Frontmatter::Parsed(metadata) => debug!(keys = metadata.len(), "frontmatter parsed"),
            Frontmatter::Unterminated => warn!("frontmatter has no closing delimiter, treating it as body"),
            Frontmatter::Malformed(reason) => warn!(%reason, "ignoring malformed frontmatter"),
        }
        let body = extracted.body;

        let rendered = if self.options.enable_math {
            let mut spans = MathSpans::new();
            let protected = math::protect(body, &mut spans);
            if math::count_delimiters(body) % 2 == 1 {
                warn!("unpaired $$ delimiter left as text");
            }
            debug!(spans = spans.len(), "math blocks protected");

            let rendered = self.markdown.render_protected(&protected, &mut spans)?;

            let restoration = math::restore(&rendered, spans);
            if !restoration.is_clean() {
                warn!(
                    missing = ?restoration.missing,
                    stray = restoration.stray,
                    "math placeholders did not survive rendering intact"
                );
            }
            restoration.html
        } else {
            self.markdown.render(body)?
        };

        let scripts = select_scripts(body, &self.options);
        debug!(scripts = scripts.len(), "scripts selected");

        Ok(assemble(
            extracted.metadata(),
            rendered,
            scripts,
            self.options.theme,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{DARK_STYLESHEET, LIGHT_STYLESHEET, MATH_SCRIPT};
    use crate::options::Theme;

    /// Renders markdown verbatim, so placeholders reach restore untouched.
    struct Verbatim;

    impl MarkdownRenderer for Verbatim {
        fn render(&self, markdown: &str) -> Result<String> {
            Ok(markdown.to_owned())
        }
    }

    struct Failing;

    impl MarkdownRenderer for Failing {
        fn render(&self, _: &str) -> Result<String> {
            Err(Error::Render("boom".into()))
        }
    }

    fn math_options() -> ConversionOptions {
        ConversionOptions {
            enable_math: true,
            ..ConversionOptions::default()
        }
    }

    #[test]
    fn math_round_trips_through_passthrough_renderer() {
        let converter = Converter::with_renderers(math_options(), Verbatim, PageTemplate::new());
        let doc = converter.build_document("$$T$$").unwrap();
        assert_eq!(doc.body, "<div class=\"math-block\">$$\nT\n$$</div>");
        assert_eq!(doc.scripts, vec![MATH_SCRIPT.to_owned()]);
    }

    #[test]
    fn math_is_untouched_when_disabled() {
        let converter =
            Converter::with_renderers(ConversionOptions::default(), Verbatim, PageTemplate::new());
        let doc = converter.build_document("$$T$$").unwrap();
        assert_eq!(doc.body, "$$T$$");
        assert!(doc.scripts.is_empty());
    }

    #[test]
    fn scripts_read_the_source_not_the_placeholders() {
        let converter = Converter::with_renderers(math_options(), Verbatim, PageTemplate::new());
        let doc = converter.build_document("only $$x$$ here").unwrap();
        assert_eq!(doc.scripts.len(), 1);
    }

    #[test]
    fn title_and_theme_flow_into_document() {
        let options = ConversionOptions::with_theme(Theme::Light);
        let converter = Converter::with_renderers(options, Verbatim, PageTemplate::new());
        let doc = converter.build_document("---\ntitle: X\n---\nBody").unwrap();
        assert_eq!(doc.title, "X");
        assert_eq!(doc.body, "Body");
        assert_eq!(doc.stylesheet, LIGHT_STYLESHEET);
    }

    #[test]
    fn malformed_frontmatter_still_converts() {
        let converter = Converter::new(ConversionOptions::default());
        let doc = converter
            .build_document("---\n: : :\n  - [\n---\n# Hi")
            .unwrap();
        assert_eq!(doc.title, "Document");
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.stylesheet, DARK_STYLESHEET);
    }

    #[test]
    fn renderer_failure_aborts() {
        let converter =
            Converter::with_renderers(ConversionOptions::default(), Failing, PageTemplate::new());
        let err = converter.convert(b"# x").unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let converter =
            Converter::with_renderers(ConversionOptions::default(), Verbatim, PageTemplate::new());
        let page = converter.convert(b"caf\xE9").unwrap();
        let page = String::from_utf8(page).unwrap();
        assert!(page.contains("caf\u{FFFD}"));
    }
}
