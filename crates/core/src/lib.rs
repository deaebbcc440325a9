//! mkdown core: turns one markdown document into a self-contained HTML page.
//!
//! ```no_run
//! use mkdown_core::{ConversionOptions, Converter, Theme};
//!
//! let converter = Converter::new(ConversionOptions {
//!     theme: Theme::Light,
//!     enable_diagrams: true,
//!     enable_math: true,
//! });
//! let page = converter.convert(b"---\ntitle: Notes\n---\n# Hello $$x^2$$")?;
//! # Ok::<(), mkdown_core::Error>(())
//! ```
//!
//! The markdown engine and the page template sit behind the
//! [`MarkdownRenderer`] and [`TemplateRenderer`] traits; everything else is
//! the pipeline in [`converter`].

pub mod assets;
pub mod converter;
pub mod document;
pub mod error;
pub mod highlight;
pub mod markdown;
pub mod math;
pub mod metadata;
pub mod options;
pub mod scripts;
pub mod slugify;
pub mod template;

pub use crate::converter::Converter;
pub use crate::document::{DocumentModel, assemble};
pub use crate::error::{Error, Result};
pub use crate::markdown::{MarkdownRenderer, PulldownRenderer};
pub use crate::math::{MathSpan, MathSpans, Restoration};
pub use crate::metadata::{DEFAULT_TITLE, Extracted, Frontmatter, Metadata, extract};
pub use crate::options::{ConversionOptions, Theme, UnknownTheme};
pub use crate::scripts::select_scripts;
pub use crate::template::{PageTemplate, TemplateRenderer};

/// Crate version, as reported by the front ends.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
