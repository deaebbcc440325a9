//! Conversion options shared by every front end.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Presentation theme. Selects the stylesheet and the diagram color preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a theme name is neither `dark` nor `light`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid theme '{0}'. Available: dark, light")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Options for a single conversion (all default to off / dark).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    pub theme: Theme,
    /// Permits injection of the diagram initializer.
    pub enable_diagrams: bool,
    /// Permits math shielding and injection of the math initializer.
    pub enable_math: bool,
}

impl ConversionOptions {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Names of the enabled optional features, in display order.
    pub fn enabled_features(&self) -> Vec<&'static str> {
        let mut features = Vec::new();
        if self.enable_diagrams {
            features.push("mermaid");
        }
        if self.enable_math {
            features.push("math");
        }
        features
    }
}
