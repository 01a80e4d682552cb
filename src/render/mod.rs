//! Rendering primitives and the renderer seam
//!
//! The document hands a renderer nothing symbolic: a bounding viewport and
//! an ordered list of primitives with concrete integer attributes. The SVG
//! implementation lives in this module; anything else (test doubles, other
//! formats) only needs the [`Renderer`] trait.

mod config;
mod svg;

pub use config::SvgConfig;
pub use svg::SvgRenderer;

/// The output document's bounding viewport, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub min_x: i64,
    pub min_y: i64,
    pub width: i64,
    pub height: i64,
}

/// Stroke and fill for one primitive. Stroke color and width are fixed
/// constants in the reference behavior, not configurable per shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: i64,
}

impl Style {
    /// The standard shape style: the given fill with a black hairline.
    pub fn outlined(fill: impl Into<String>) -> Self {
        Style {
            fill: fill.into(),
            stroke: "black".to_string(),
            stroke_width: 1,
        }
    }
}

/// A shape with fully concrete geometry, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Rect {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        style: Style,
    },
    Circle {
        cx: i64,
        cy: i64,
        radius: i64,
        style: Style,
    },
}

/// Serializes solved primitives into an output document.
pub trait Renderer {
    fn render(&self, viewport: &Viewport, primitives: &[Primitive]) -> String;
}
