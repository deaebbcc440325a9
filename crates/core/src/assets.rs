//! Bundled page template, stylesheets and script bodies.

use crate::options::Theme;

pub const PAGE_TEMPLATE: &str = include_str!("assets/default.html");

pub const DARK_STYLESHEET: &str = include_str!("assets/dark.css");
pub const LIGHT_STYLESHEET: &str = include_str!("assets/light.css");

/// Mermaid initializer. Carries a [`THEME_TOKEN`] to substitute.
pub const DIAGRAM_SCRIPT: &str = include_str!("assets/mermaid.js");
/// KaTeX auto-render initializer.
pub const MATH_SCRIPT: &str = include_str!("assets/katex.js");

pub const THEME_TOKEN: &str = "{{THEME}}";

pub fn stylesheet(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => LIGHT_STYLESHEET,
        Theme::Dark => DARK_STYLESHEET,
    }
}
