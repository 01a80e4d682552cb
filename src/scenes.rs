//! Built-in demonstration documents
//!
//! These are call sites of the engine, not part of the core; they are kept
//! in the library so the CLI and the integration tests can share them.

use crate::constraint::Expr;
use crate::document::Document;
use crate::error::DocumentError;

/// Three tiered rectangles with a pairwise separation rule: any shape of a
/// higher tier must sit at least 5 units above every lower-tier shape.
pub fn tiers() -> Result<Document, DocumentError> {
    let mut doc = Document::new();
    doc.rect("boss")
        .fill("red")
        .x(0)
        .width(10)
        .height(10)
        .label("tier", 0)
        .finish()?;
    doc.rect("middle-manager")
        .fill("green")
        .x(0)
        .width(10)
        .height(10)
        .label("tier", 1)
        .finish()?;
    doc.rect("peon")
        .fill("blue")
        .x(0)
        .width(10)
        .height(10)
        .label("tier", 2)
        .finish()?;

    doc.when_pairs(|a, b| a.label_int("tier") > b.label_int("tier"))
        .then(|a, b| a.bottom().le(b.top() - 5));

    Ok(doc)
}

/// A pinned outer frame with an unpinned inner rectangle held 10 units
/// inside each edge; the solver derives the inner geometry.
pub fn inset() -> Result<Document, DocumentError> {
    let mut doc = Document::new();
    let outer = doc.rect("outer").x(0).y(0).width(200).height(100).finish()?;
    let inner = doc.rect("inner").fill("red").finish()?;

    doc.require(inner.left().eq(outer.left() + 10));
    doc.require(inner.right().eq(outer.right() - 10));
    doc.require(inner.top().eq(outer.top() + 10));
    doc.require(inner.bottom().eq(outer.bottom() - 10));

    Ok(doc)
}

/// A square and a circle constrained to the same width.
pub fn squircle() -> Result<Document, DocumentError> {
    let mut doc = Document::new();
    let square = doc.rect("square").x(2).y(2).width(100).height(100).finish()?;
    let ball = doc.circle("ball").center_x(60).center_y(60).finish()?;

    doc.require(square.width().eq(ball.width()));

    Ok(doc)
}

/// A 15x15 grid of tiles chained purely by relative constraints: each tile
/// starts where the previous one ended. Fizzbuzz coloring on the diagonal
/// index.
pub fn mosaic() -> Result<Document, DocumentError> {
    let mut doc = Document::new();
    let mut next_left = Expr::from(0);
    let mut next_top = Expr::from(0);

    for row in 1..=15i64 {
        let mut last = None;
        for col in 1..=15i64 {
            let index = col + row - 1;
            let fill = if index % 15 == 0 {
                "purple"
            } else if index % 3 == 0 {
                "red"
            } else if index % 5 == 0 {
                "blue"
            } else {
                "white"
            };

            let tile = doc
                .rect(format!("tile-{col}-{row}"))
                .fill(fill)
                .width(15)
                .height(15)
                .finish()?;
            doc.require(tile.left().eq(next_left.clone()));
            doc.require(tile.top().eq(next_top.clone()));
            next_left = tile.right();
            last = Some(tile);
        }
        if let Some(tile) = last {
            next_top = tile.bottom();
        }
        next_left = Expr::from(0);
    }

    Ok(doc)
}
