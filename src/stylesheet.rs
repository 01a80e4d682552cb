//! Stylesheet support for fill colors
//!
//! Shapes name their fill with either a concrete color (hex or an SVG named
//! color, passed through verbatim) or a symbolic token resolved against a
//! TOML palette. Palettes let the same document render under different
//! color schemes.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets.
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("failed to read stylesheet file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse stylesheet TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A palette mapping symbolic color tokens to concrete values.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the palette.
    pub name: Option<String>,
    /// Color mappings: token name -> color value.
    pub colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

const DEFAULT_PALETTE: &str = r##"
[colors]
paper = "#ffffff"
ink = "#1a1a1a"
accent = "#2196f3"
secondary = "#ff9800"
muted = "#9e9e9e"
"##;

impl Stylesheet {
    /// Load a palette from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a palette from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;
        Ok(Stylesheet {
            name: parsed.metadata.and_then(|m| m.name),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic token, or `None` if the palette does not define
    /// it.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a fill value: mapped tokens take their palette color; hex
    /// values and SVG named colors pass through verbatim.
    pub fn resolve_fill(&self, fill: &str) -> String {
        match self.resolve(fill) {
            Some(color) => color.to_string(),
            None => fill.to_string(),
        }
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("default palette is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_tokens() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("paper"), Some("#ffffff"));
        assert_eq!(stylesheet.resolve("accent"), Some("#2196f3"));
        assert_eq!(stylesheet.resolve("nonexistent"), None);
    }

    #[test]
    fn test_concrete_colors_pass_through() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve_fill("#ff0000"), "#ff0000");
        assert_eq!(stylesheet.resolve_fill("rebeccapurple"), "rebeccapurple");
    }

    #[test]
    fn test_tokens_resolve_before_passthrough() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve_fill("accent"), "#2196f3");
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Night"

[colors]
paper = "#000000"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("should parse");
        assert_eq!(stylesheet.name, Some("Night".to_string()));
        assert_eq!(stylesheet.resolve("paper"), Some("#000000"));
    }

    #[test]
    fn test_parse_toml_without_metadata() {
        let toml_str = r##"
[colors]
paper = "#111111"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("should parse");
        assert_eq!(stylesheet.name, None);
        assert_eq!(stylesheet.resolve("paper"), Some("#111111"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        assert!(Stylesheet::from_str(invalid).is_err());
    }
}
