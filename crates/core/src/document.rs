use serde::Serialize;

use crate::assets;
use crate::metadata::{DEFAULT_TITLE, Metadata};
use crate::options::Theme;

/// A fully assembled, template-ready page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentModel {
    pub title: String,
    /// Rendered HTML, trusted by construction.
    pub body: String,
    pub stylesheet: &'static str,
    /// Initializer scripts, in injection order.
    pub scripts: Vec<String>,
    pub metadata: Metadata,
}

/// Composes a [`DocumentModel`]. The title comes from the metadata `title`
/// string when present; the stylesheet from `theme`.
pub fn assemble(
    metadata: Metadata,
    body: String,
    scripts: Vec<String>,
    theme: Theme,
) -> DocumentModel {
    let title = metadata
        .get("title")
        .and_then(serde_yaml::Value::as_str)
        .unwrap_or(DEFAULT_TITLE)
        .to_owned();

    DocumentModel {
        title,
        body,
        stylesheet: assets::stylesheet(theme),
        scripts,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    #[test]
    fn defaults_title_and_dark_stylesheet() {
        let doc = assemble(Metadata::new(), "<p>x</p>".into(), Vec::new(), Theme::default());
        assert_eq!(doc.title, "Document");
        assert_eq!(doc.stylesheet, assets::DARK_STYLESHEET);
        assert!(doc.scripts.is_empty());
    }

    #[test]
    fn takes_title_from_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("title".into(), Value::from("Notes"));
        let doc = assemble(metadata, String::new(), Vec::new(), Theme::Light);
        assert_eq!(doc.title, "Notes");
        assert_eq!(doc.stylesheet, assets::LIGHT_STYLESHEET);
        assert_eq!(doc.metadata.len(), 1);
    }

    #[test]
    fn is_deterministic() {
        let build = || {
            let mut metadata = Metadata::new();
            metadata.insert("b".into(), Value::from(2));
            metadata.insert("a".into(), Value::from(1));
            assemble(metadata, "<p/>".into(), vec!["<script></script>".into()], Theme::Dark)
        };
        assert_eq!(build(), build());
    }
}
