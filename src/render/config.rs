//! Configuration for SVG output

/// Options for SVG serialization.
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Extra space around the viewBox. Zero keeps the viewport exactly at
    /// the solved document bounds.
    pub viewbox_padding: i64,

    /// Whether to include the XML declaration.
    pub standalone: bool,

    /// Whether to format output with newlines and indentation.
    pub pretty_print: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 0,
            standalone: false,
            pretty_print: true,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewBox padding.
    pub fn with_viewbox_padding(mut self, padding: i64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Set whether to emit the XML declaration.
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output.
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert_eq!(config.viewbox_padding, 0);
        assert!(!config.standalone);
        assert!(config.pretty_print);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_viewbox_padding(10)
            .with_standalone(true)
            .with_pretty_print(false);

        assert_eq!(config.viewbox_padding, 10);
        assert!(config.standalone);
        assert!(!config.pretty_print);
    }
}
