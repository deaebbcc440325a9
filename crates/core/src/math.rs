//! Shields `$$ ... $$` math blocks from the markdown renderer.
//!
//! Before rendering, every paired block is swapped for an alphanumeric
//! placeholder (`MATHBLOCK0END`) and its literal text is kept in a
//! [`MathSpans`] store. The placeholder has no markdown or HTML punctuation,
//! so it renders as plain inline text wherever it lands and nothing around it
//! changes meaning. After rendering, [`restore`] puts the text back inside a
//! `math-block` container. The store belongs to exactly one conversion: it is
//! created by the caller, filled by [`protect`] and consumed by [`restore`].

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

pub const DELIMITER: &str = "$$";

const PLACEHOLDER_PREFIX: &str = "MATHBLOCK";
const PLACEHOLDER_SUFFIX: &str = "END";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"MATHBLOCK(\d+)END").expect("placeholder pattern is valid")
});

/// One protected region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    pub id: usize,
    pub text: String,
}

impl MathSpan {
    pub fn placeholder(&self) -> String {
        placeholder(self.id)
    }

    fn to_html(&self) -> String {
        format!("<div class=\"math-block\">{DELIMITER}\n{}\n{DELIMITER}</div>", self.text)
    }

    fn to_literal(&self) -> String {
        format!("{DELIMITER}{}{DELIMITER}", self.text)
    }
}

pub fn placeholder(id: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{id}{PLACEHOLDER_SUFFIX}")
}

/// Call-scoped store of protected spans. Identifiers are indices, assigned
/// sequentially from zero. Each span can be claimed once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MathSpans {
    spans: Vec<MathSpan>,
    claimed: Vec<bool>,
}

impl MathSpans {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&MathSpan> {
        self.spans.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MathSpan> {
        self.spans.iter()
    }

    fn push(&mut self, text: &str) -> &MathSpan {
        let id = self.spans.len();
        self.spans.push(MathSpan {
            id,
            text: text.to_owned(),
        });
        self.claimed.push(false);
        &self.spans[id]
    }

    /// The span for a placeholder id, unless it was already claimed.
    fn claim(&mut self, id: &str) -> Option<&MathSpan> {
        let id = id.parse::<usize>().ok()?;
        let claimed = self.claimed.get_mut(id)?;
        if *claimed {
            return None;
        }
        *claimed = true;
        self.spans.get(id)
    }

    fn unclaimed(&self) -> Vec<usize> {
        self.claimed
            .iter()
            .enumerate()
            .filter(|(_, claimed)| !**claimed)
            .map(|(id, _)| id)
            .collect()
    }
}

/// Replaces each paired `$$` block in `body` with a placeholder, recording
/// the enclosed text in `spans`.
///
/// Fewer than two delimiters is a no-op. With an odd delimiter count the last
/// `$$` and everything after it stay as ordinary text.
pub fn protect<'a>(body: &'a str, spans: &mut MathSpans) -> Cow<'a, str> {
    let segments: Vec<&str> = body.split(DELIMITER).collect();
    let delimiters = segments.len() - 1;
    if delimiters < 2 {
        return Cow::Borrowed(body);
    }

    let paired = delimiters - delimiters % 2;
    let mut protected = String::with_capacity(body.len());
    for (index, segment) in segments.iter().enumerate() {
        if index % 2 == 0 {
            protected.push_str(segment);
        } else if index <= paired {
            protected.push_str(&spans.push(segment).placeholder());
        } else {
            // unterminated trailing block
            protected.push_str(DELIMITER);
            protected.push_str(segment);
        }
    }

    Cow::Owned(protected)
}

/// Puts the literal `$$...$$` back for every placeholder in `text` and
/// claims those spans.
///
/// For regions a renderer shows verbatim, such as code, where the math is
/// not math and must not be wrapped or restyled.
pub fn reinstate<'a>(text: &'a str, spans: &mut MathSpans) -> Cow<'a, str> {
    if spans.is_empty() || !text.contains(PLACEHOLDER_PREFIX) {
        return Cow::Borrowed(text);
    }

    PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| match spans.claim(&caps[1]) {
        Some(span) => span.to_literal(),
        None => caps[0].to_owned(),
    })
}

/// Outcome of [`restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restoration {
    pub html: String,
    /// Spans never claimed, here or by an earlier [`reinstate`].
    pub missing: Vec<usize>,
    /// Placeholders left in place because no unclaimed span matched them.
    pub stray: usize,
}

impl Restoration {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.stray == 0
    }
}

/// Substitutes every placeholder in `html` with its span wrapped in a
/// `math-block` container.
///
/// Each span is used at most once. Unknown or repeated placeholders stay
/// visible; both kinds of mismatch are reported, never raised.
pub fn restore(html: &str, mut spans: MathSpans) -> Restoration {
    if spans.is_empty() && !html.contains(PLACEHOLDER_PREFIX) {
        return Restoration {
            html: html.to_owned(),
            missing: Vec::new(),
            stray: 0,
        };
    }

    let mut stray = 0;
    let restored = PLACEHOLDER.replace_all(html, |caps: &Captures<'_>| match spans.claim(&caps[1]) {
        Some(span) => span.to_html(),
        None => {
            stray += 1;
            caps[0].to_owned()
        }
    });

    Restoration {
        html: restored.into_owned(),
        missing: spans.unclaimed(),
        stray,
    }
}

/// Number of `$$` occurrences in `text`.
pub fn count_delimiters(text: &str) -> usize {
    text.matches(DELIMITER).count()
}
