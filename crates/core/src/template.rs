//! Page templating.

use minijinja::{Environment, context};

use crate::assets::PAGE_TEMPLATE;
use crate::document::DocumentModel;
use crate::error::Result;

/// Turns an assembled document into the final page.
pub trait TemplateRenderer {
    fn render(&self, document: &DocumentModel) -> Result<String>;
}

const TEMPLATE_NAME: &str = "page.html";

/// minijinja page template. The `.html` name turns on auto-escaping, so only
/// values passed through `|safe` (stylesheet, body, scripts) are emitted raw.
///
/// Template variables: `title`, `body`, `stylesheet`, `scripts` (list),
/// `metadata` (mapping).
pub struct PageTemplate {
    env: Environment<'static>,
}

impl PageTemplate {
    /// The bundled template.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, PAGE_TEMPLATE)
            .expect("bundled page template is valid");
        Self { env }
    }

    /// A caller-supplied template using the same variables.
    pub fn from_source(source: impl Into<String>) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME, source.into())?;
        Ok(Self { env })
    }
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for PageTemplate {
    fn render(&self, document: &DocumentModel) -> Result<String> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let page = template.render(context! {
            title => &document.title,
            body => &document.body,
            stylesheet => document.stylesheet,
            scripts => &document.scripts,
            metadata => &document.metadata,
        })?;
        Ok(page)
    }
}
