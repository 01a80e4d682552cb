//! Drafter - a declarative, constraint-based drawing engine
//!
//! Callers describe rectangles and circles plus symbolic constraints over
//! their attributes instead of concrete coordinates. A constraint solver
//! derives a satisfying assignment, and the result is rendered as SVG.
//!
//! # Example
//!
//! ```rust
//! use drafter::Document;
//!
//! let mut doc = Document::new();
//! let badge = doc.rect("badge").x(0).y(0).width(120).height(40).finish().unwrap();
//! let dot = doc.circle("dot").radius(8).finish().unwrap();
//!
//! // The dot's center rides the badge's right edge, vertically centered.
//! doc.require(dot.center_x().eq(badge.right()));
//! doc.require((2 * dot.center_y()).eq(badge.top() + badge.bottom()));
//!
//! let svg = doc.render().unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("<circle"));
//! ```

pub mod constraint;
pub mod document;
pub mod error;
pub mod render;
pub mod rule;
pub mod scenes;
pub mod shape;
pub mod solver;
pub mod stylesheet;

pub use constraint::{Constraint, Expr, Relation, Var};
pub use document::{CircleBuilder, Document, Layout, RectBuilder};
pub use error::DocumentError;
pub use render::{Primitive, Renderer, Style, SvgConfig, SvgRenderer, Viewport};
pub use rule::{EachRule, PairsRule};
pub use shape::{LabelValue, Shape, ShapeKind};
pub use solver::{CassowarySolver, Feasibility, Model, Solver, SolverError};
pub use stylesheet::{Stylesheet, StylesheetError};

/// Configuration for the solve-and-render pipeline.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// SVG output configuration.
    pub svg: SvgConfig,
    /// Stylesheet for fill color resolution.
    pub stylesheet: Stylesheet,
}

impl RenderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration.
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for fill color resolution.
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple_shape() {
        let mut doc = Document::new();
        doc.rect("server")
            .x(0)
            .y(0)
            .width(60)
            .height(40)
            .finish()
            .unwrap();
        let svg = doc.render().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 60 40""#));
    }

    #[test]
    fn test_render_with_fill_token() {
        let mut doc = Document::new();
        doc.rect("box")
            .fill("accent")
            .x(0)
            .y(0)
            .width(10)
            .height(10)
            .finish()
            .unwrap();
        let config = RenderConfig::new().with_stylesheet(Stylesheet::default());
        let svg = doc.render_with(&config).unwrap();
        assert!(svg.contains(r##"fill="#2196f3""##));
    }

    #[test]
    fn test_render_unsatisfiable_document_errors() {
        let mut doc = Document::new();
        doc.rect("box").x(0).width(10).finish().unwrap();
        doc.require(Expr::Var(Var::attr("box", "right")).eq(5));

        let err = doc.render().unwrap_err();
        assert!(matches!(err, DocumentError::Unsatisfiable { .. }));
    }
}
