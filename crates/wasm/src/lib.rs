use mkdown_core::{ConversionOptions, Converter, Theme};
use wasm_bindgen::prelude::*;

/// Converts markdown into a complete HTML page.
///
/// `theme` accepts `"dark"` (default) or `"light"`. Diagram and math
/// support are off unless requested.
#[wasm_bindgen(js_name = render_page)]
pub fn render_page(
    input: &str,
    theme: Option<String>,
    mermaid: Option<bool>,
    math: Option<bool>,
) -> Result<String, JsError> {
    let theme = match theme.as_deref() {
        Some(name) => name.parse::<Theme>().map_err(to_js_error)?,
        None => Theme::default(),
    };
    let options = ConversionOptions {
        theme,
        enable_diagrams: mermaid.unwrap_or(false),
        enable_math: math.unwrap_or(false),
    };

    Converter::new(options)
        .convert_str(input)
        .map_err(to_js_error)
}

#[wasm_bindgen]
pub fn version() -> String {
    mkdown_core::version().to_string()
}

fn to_js_error<E: ToString>(err: E) -> JsError {
    JsError::new(&err.to_string())
}
