//! Markdown-to-HTML rendering.
//!
//! The pipeline only depends on [`MarkdownRenderer`]; [`PulldownRenderer`] is
//! the bundled implementation on top of `pulldown-cmark`. It post-processes
//! the event stream for three things the parser leaves out: heading anchors,
//! bare-URL autolinking and fenced-code highlighting.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use pulldown_cmark::{
    CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use regex::Regex;

use crate::error::Result;
use crate::highlight::Highlighter;
use crate::math::{self, MathSpans};
use crate::slugify::slugify;

/// Renders a markdown body to an HTML fragment.
///
/// Implementations must pass raw HTML through unescaped so restored math
/// containers are not re-escaped.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String>;

    /// Renders a body that went through [`math::protect`]. Renderers that show
    /// some regions verbatim, such as code, put the literal math back there
    /// with [`math::reinstate`] instead of leaving a placeholder.
    fn render_protected(&self, markdown: &str, spans: &mut MathSpans) -> Result<String> {
        let _ = spans;
        self.render(markdown)
    }
}

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>]+").expect("url pattern is valid")
});

/// Extension set of the bundled renderer.
pub fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_DEFINITION_LIST);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options.insert(Options::ENABLE_GFM);
    options
}

/// `pulldown-cmark` backed renderer with anchors, autolinks and highlighting.
#[derive(Default)]
pub struct PulldownRenderer {
    highlighter: Highlighter,
}

impl PulldownRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> Result<String> {
        self.render_with(markdown, None)
    }

    fn render_protected(&self, markdown: &str, spans: &mut MathSpans) -> Result<String> {
        self.render_with(markdown, Some(spans))
    }
}

impl PulldownRenderer {
    fn render_with(&self, markdown: &str, spans: Option<&mut MathSpans>) -> Result<String> {
        let mut events: Vec<Event<'_>> =
            TextMergeStream::new(Parser::new_ext(markdown, parser_options())).collect();

        assign_heading_ids(&mut events);
        let events = self.rewrite(events, spans)?;

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        Ok(output)
    }

    /// Replaces fenced code with highlighted HTML and bare URLs with links.
    /// Math placeholders inside code go back to their literal text first.
    fn rewrite<'a>(
        &self,
        events: Vec<Event<'a>>,
        mut spans: Option<&mut MathSpans>,
    ) -> Result<Vec<Event<'a>>> {
        let mut rewritten = Vec::with_capacity(events.len());
        let mut code: Option<(Option<String>, String)> = None;
        let mut link_depth = 0usize;

        for event in events {
            if let Some((language, buffer)) = code.as_mut() {
                match event {
                    Event::Text(text) => buffer.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let html = {
                            let source = verbatim(buffer, spans.as_deref_mut());
                            self.highlighter.render_block(&source, language.as_deref())?
                        };
                        rewritten.push(Event::Html(CowStr::from(html)));
                        code = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match kind {
                        CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                        CodeBlockKind::Indented => None,
                    };
                    code = Some((language, String::new()));
                }
                Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. })) => {
                    link_depth += 1;
                    rewritten.push(Event::Start(tag));
                }
                Event::End(end @ (TagEnd::Link | TagEnd::Image)) => {
                    link_depth = link_depth.saturating_sub(1);
                    rewritten.push(Event::End(end));
                }
                Event::Code(text) => {
                    let reinstated = match verbatim(&text, spans.as_deref_mut()) {
                        Cow::Owned(literal) => Some(literal),
                        Cow::Borrowed(_) => None,
                    };
                    rewritten.push(Event::Code(reinstated.map_or(text, CowStr::from)));
                }
                Event::Text(text) if link_depth == 0 && BARE_URL.is_match(&text) => {
                    linkify(&text, &mut rewritten);
                }
                other => rewritten.push(other),
            }
        }

        Ok(rewritten)
    }
}

fn verbatim<'s>(text: &'s str, spans: Option<&mut MathSpans>) -> Cow<'s, str> {
    match spans {
        Some(spans) => math::reinstate(text, spans),
        None => Cow::Borrowed(text),
    }
}

/// Gives every heading without an explicit id one derived from its text.
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut used = HashSet::new();
    let mut open: Option<(usize, String)> = None;

    for index in 0..events.len() {
        let closed = match &events[index] {
            Event::Start(Tag::Heading { id: Some(id), .. }) => {
                used.insert(id.to_string());
                None
            }
            Event::Start(Tag::Heading { id: None, .. }) => {
                open = Some((index, String::new()));
                None
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buffer)) = open.as_mut() {
                    buffer.push_str(text);
                }
                None
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buffer)) = open.as_mut() {
                    buffer.push(' ');
                }
                None
            }
            Event::End(TagEnd::Heading(_)) => open.take(),
            _ => None,
        };

        if let Some((start, text)) = closed {
            let slug = slugify(text.trim(), &mut used);
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
                *id = Some(CowStr::from(slug));
            }
        }
    }
}

fn linkify<'a>(text: &str, events: &mut Vec<Event<'a>>) {
    let mut cursor = 0;

    for found in BARE_URL.find_iter(text) {
        let url = trim_url(found.as_str());
        if url.is_empty() {
            continue;
        }
        let start = found.start();
        let end = start + url.len();

        if start > cursor {
            events.push(Event::Text(CowStr::from(text[cursor..start].to_owned())));
        }

        let href = if url.len() >= 4 && url[..4].eq_ignore_ascii_case("www.") {
            format!("http://{url}")
        } else {
            url.to_owned()
        };
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(href),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push(Event::Text(CowStr::from(url.to_owned())));
        events.push(Event::End(TagEnd::Link));

        cursor = end;
    }

    if cursor < text.len() {
        events.push(Event::Text(CowStr::from(text[cursor..].to_owned())));
    }
}

/// Drops trailing punctuation that belongs to the sentence, and a closing
/// parenthesis with no opening one inside the URL.
fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        let Some(last) = url.chars().last() else {
            return url;
        };
        let trim = match last {
            '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '"' | '*' | '_' | '~' => true,
            ')' => url.matches(')').count() > url.matches('(').count(),
            _ => false,
        };
        if !trim {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        PulldownRenderer::new().render(markdown).unwrap()
    }

    #[test]
    fn renders_basic_markdown() {
        let html = render("# Test Heading\n\nThis is **bold** and *italic*.\n\n- List item 1\n- List item 2\n");
        assert!(html.contains("<h1 id=\"test-heading\">Test Heading</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<li>List item 1</li>"));
    }

    #[test]
    fn assigns_unique_heading_ids() {
        let html = render("# Repeat\n## Repeat\n### `code` Heading");
        assert!(html.contains("<h1 id=\"repeat\">"));
        assert!(html.contains("<h2 id=\"repeat-1\">"));
        assert!(html.contains("<h3 id=\"code-heading\">"));
    }

    #[test]
    fn keeps_explicit_heading_ids() {
        let html = render("# Intro {#start}\n# Start");
        assert!(html.contains("<h1 id=\"start\">Intro</h1>"));
        assert!(html.contains("<h1 id=\"start-1\">Start</h1>"));
    }

    #[test]
    fn supports_gfm_extensions() {
        let html = render(
            "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done\n- [ ] todo\n",
        );
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn supports_footnotes() {
        let html = render("Text with footnote[^1].\n\n[^1]: Footnote content.");
        assert!(html.contains("footnote-reference"));
        assert!(html.contains("footnote-definition"));
        assert!(html.contains("Footnote content"));
    }

    #[test]
    fn supports_definition_lists() {
        let html = render("Term\n: Definition");
        assert!(html.contains("<dl>"));
        assert!(html.contains("<dt>Term</dt>"));
        assert!(html.contains("Definition"));
    }

    #[test]
    fn applies_smart_punctuation() {
        let html = render("\"quoted\" -- dash...");
        assert!(html.contains('\u{201c}'));
        assert!(html.contains('\u{2013}'));
        assert!(html.contains('\u{2026}'));
    }

    #[test]
    fn passes_raw_html_through() {
        let html = render("before <span class=\"x\">in</span> after\n\n<div>block</div>\n");
        assert!(html.contains("<span class=\"x\">in</span>"));
        assert!(html.contains("<div>block</div>"));
        assert!(!html.contains("&lt;"));
    }

    #[test]
    fn placeholder_at_line_start_stays_inline() {
        let html = render("MATHBLOCK0END is **bold** and *em*\n");
        assert_eq!(
            html,
            "<p>MATHBLOCK0END is <strong>bold</strong> and <em>em</em></p>\n"
        );
    }

    #[test]
    fn code_gets_literal_math_back() {
        let mut spans = MathSpans::new();
        let protected = math::protect(
            "`$$inline$$`\n\n```nosuchlang\necho $$ and $$\n```\n",
            &mut spans,
        )
        .into_owned();

        let html = PulldownRenderer::new()
            .render_protected(&protected, &mut spans)
            .unwrap();
        assert!(html.contains("<code>$$inline$$</code>"));
        assert!(html.contains("<code class=\"language-nosuchlang\">echo $$ and $$\n</code>"));
        assert!(!html.contains("MATHBLOCK"));
        assert!(math::restore(&html, spans).is_clean());
    }

    #[test]
    fn autolinks_bare_urls() {
        let html = render("See https://example.com/path. Or www.rust-lang.org!");
        assert!(html.contains("<a href=\"https://example.com/path\">https://example.com/path</a>."));
        assert!(html.contains("<a href=\"http://www.rust-lang.org\">www.rust-lang.org</a>!"));
    }

    #[test]
    fn does_not_autolink_inside_links_or_code() {
        let html = render("[site](https://example.com) and `https://code.example`");
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains("<code>https://code.example</code>"));
    }

    #[test]
    fn highlights_fenced_code() {
        let html = render("```rust\nlet x = 1;\n```\n");
        assert!(html.contains("<pre class=\"highlight\"><code class=\"language-rust\">"));
    }

    #[test]
    fn leaves_mermaid_fence_for_the_client() {
        let html = render("```mermaid\ngraph TD\n  A --> B\n```\n");
        assert!(html.contains("<pre><code class=\"language-mermaid\">graph TD\n  A --&gt; B\n</code></pre>"));
    }

    #[test]
    fn trims_sentence_punctuation_from_urls() {
        assert_eq!(trim_url("https://a.b/c)."), "https://a.b/c");
        assert_eq!(trim_url("https://a.b/(c)"), "https://a.b/(c)");
        assert_eq!(trim_url("www.x.org,"), "www.x.org");
    }
}
