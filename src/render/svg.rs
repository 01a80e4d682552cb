//! SVG serialization of solved primitives

use crate::stylesheet::Stylesheet;

use super::{Primitive, Renderer, Style, SvgConfig, Viewport};

/// Renders primitives as an SVG document, resolving symbolic fill tokens
/// through a stylesheet.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: SvgConfig,
    stylesheet: Stylesheet,
}

impl SvgRenderer {
    pub fn new(config: SvgConfig, stylesheet: Stylesheet) -> Self {
        SvgRenderer { config, stylesheet }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn indent(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn style_attrs(&self, style: &Style) -> String {
        format!(
            r#"fill="{}" stroke="{}" stroke-width="{}""#,
            self.stylesheet.resolve_fill(&style.fill),
            style.stroke,
            style.stroke_width
        )
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, viewport: &Viewport, primitives: &[Primitive]) -> String {
        let padding = self.config.viewbox_padding;
        let nl = self.newline();

        let mut out = String::new();
        if self.config.standalone {
            out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            out.push_str(nl);
        }
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            viewport.min_x - padding,
            viewport.min_y - padding,
            viewport.width + 2 * padding,
            viewport.height + 2 * padding
        ));
        out.push_str(nl);

        for primitive in primitives {
            out.push_str(self.indent());
            match primitive {
                Primitive::Rect {
                    x,
                    y,
                    width,
                    height,
                    style,
                } => {
                    out.push_str(&format!(
                        r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" {}/>"#,
                        self.style_attrs(style)
                    ));
                }
                Primitive::Circle {
                    cx,
                    cy,
                    radius,
                    style,
                } => {
                    out.push_str(&format!(
                        r#"<circle cx="{cx}" cy="{cy}" r="{radius}" {}/>"#,
                        self.style_attrs(style)
                    ));
                }
            }
            out.push_str(nl);
        }

        out.push_str("</svg>");
        out
    }
}
