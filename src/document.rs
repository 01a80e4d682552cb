//! The document: shape registry, constraint accumulation, and the
//! solve → extract pipeline
//!
//! A document owns the ordered shape list, the flat constraint set, and the
//! deferred rules. Shape factories add each shape's defining geometric
//! equations as they register it; solving expands the rules against the
//! final shape list, augments the set with the document bounding box, and
//! turns the solver's model back into renderable primitives.

use std::collections::BTreeMap;

use crate::constraint::{Constraint, Expr, Var, ATTR_SEPARATOR};
use crate::error::DocumentError;
use crate::render::{Primitive, Renderer, Style, SvgRenderer, Viewport};
use crate::rule::{EachRule, PairsRule, Rule};
use crate::shape::{LabelValue, Shape, ShapeKind};
use crate::solver::{CassowarySolver, Feasibility, Model, Solver, SolverError};
use crate::RenderConfig;

/// Reserved id for document-level variables (`doc__width`, `doc__height`).
const DOC_ID: &str = "doc";

/// Solved geometry: the bounding viewport plus concrete primitives in draw
/// order, along with the full model for callers that want raw values.
#[derive(Debug, Clone)]
pub struct Layout {
    pub viewport: Viewport,
    pub primitives: Vec<Primitive>,
    pub model: Model,
}

/// A declarative drawing: shapes, constraints, and deferred rules.
#[derive(Default)]
pub struct Document {
    shapes: Vec<Shape>,
    constraints: Vec<Constraint>,
    pub(crate) rules: Vec<Rule>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes in insertion order. This order is both the rule-expansion
    /// iteration order and the draw order (later shapes on top).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// The flat constraint set accumulated so far. Solving never mutates
    /// it; rule expansion and bounding-box augmentation happen in a working
    /// copy.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Start building a rectangle. Attributes left unpinned stay free for
    /// the solver to choose.
    pub fn rect(&mut self, id: impl Into<String>) -> RectBuilder<'_> {
        RectBuilder {
            doc: self,
            id: id.into(),
            fill: None,
            x: None,
            y: None,
            width: None,
            height: None,
            labels: BTreeMap::new(),
        }
    }

    /// Start building a circle.
    pub fn circle(&mut self, id: impl Into<String>) -> CircleBuilder<'_> {
        CircleBuilder {
            doc: self,
            id: id.into(),
            fill: None,
            center_x: None,
            center_y: None,
            radius: None,
            labels: BTreeMap::new(),
        }
    }

    /// Append a caller-supplied constraint verbatim.
    pub fn require(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Register a rule quantified over every shape.
    pub fn when_each(&mut self, predicate: impl Fn(&Shape) -> bool + 'static) -> EachRule<'_> {
        self.rules.push(Rule::Each {
            when: Box::new(predicate),
            then: None,
            otherwise: None,
        });
        let index = self.rules.len() - 1;
        EachRule::new(self, index)
    }

    /// Register a rule quantified over every ordered pair of distinct
    /// shapes.
    pub fn when_pairs(
        &mut self,
        predicate: impl Fn(&Shape, &Shape) -> bool + 'static,
    ) -> PairsRule<'_> {
        self.rules.push(Rule::Pairs {
            when: Box::new(predicate),
            then: None,
            otherwise: None,
        });
        let index = self.rules.len() - 1;
        PairsRule::new(self, index)
    }

    fn register(
        &mut self,
        id: String,
        kind: ShapeKind,
        fill: Option<String>,
        labels: BTreeMap<String, LabelValue>,
    ) -> Result<Shape, DocumentError> {
        if id.is_empty() {
            return Err(DocumentError::invalid_id(id, "id must not be empty"));
        }
        if id.contains(ATTR_SEPARATOR) {
            return Err(DocumentError::invalid_id(
                id,
                format!("id must not contain the attribute separator '{ATTR_SEPARATOR}'"),
            ));
        }
        if id == DOC_ID {
            return Err(DocumentError::invalid_id(
                id,
                "'doc' is reserved for document variables",
            ));
        }
        if self.shapes.iter().any(|s| s.id() == id) {
            return Err(DocumentError::duplicate_id(id));
        }

        let fill = fill.unwrap_or_else(|| "white".to_string());
        let shape = Shape::new(id, kind, fill, labels);
        self.shapes.push(shape.clone());
        Ok(shape)
    }

    /// Solve with the bundled cassowary solver.
    pub fn solve(&self) -> Result<Layout, DocumentError> {
        self.solve_with(&mut CassowarySolver::new())
    }

    /// Expand rules, add the bounding-box constraints, and run the solver.
    /// Infeasibility is fatal; no partial or best-effort layout is
    /// produced.
    pub fn solve_with(&self, solver: &mut dyn Solver) -> Result<Layout, DocumentError> {
        let mut working = self.constraints.clone();
        for rule in &self.rules {
            rule.expand(&self.shapes, &mut working);
        }
        self.add_bounds(&mut working);

        for constraint in working {
            solver.add(constraint);
        }
        match solver.check()? {
            Feasibility::Unsatisfiable { reason } => Err(DocumentError::Unsatisfiable { reason }),
            Feasibility::Satisfiable => {
                let model = solver.model()?;
                self.extract(&model)
            }
        }
    }

    /// Solve and serialize through the SVG renderer with default options.
    pub fn render(&self) -> Result<String, DocumentError> {
        self.render_with(&RenderConfig::default())
    }

    /// Solve and serialize through the SVG renderer.
    pub fn render_with(&self, config: &RenderConfig) -> Result<String, DocumentError> {
        let layout = self.solve()?;
        let renderer = SvgRenderer::new(config.svg.clone(), config.stylesheet.clone());
        Ok(renderer.render(&layout.viewport, &layout.primitives))
    }

    /// Pin the document extent to the shape bounds: no shape may cross the
    /// origin, and width/height equal the furthest right and bottom edges.
    fn add_bounds(&self, out: &mut Vec<Constraint>) {
        let doc_width = Expr::Var(Var::attr(DOC_ID, "width"));
        let doc_height = Expr::Var(Var::attr(DOC_ID, "height"));

        let min_left = Expr::fold_min(self.shapes.iter().map(Shape::left));
        let min_top = Expr::fold_min(self.shapes.iter().map(Shape::top));
        let max_right = Expr::fold_max(self.shapes.iter().map(Shape::right));
        let max_bottom = Expr::fold_max(self.shapes.iter().map(Shape::bottom));

        match (min_left, min_top, max_right, max_bottom) {
            (Some(min_left), Some(min_top), Some(max_right), Some(max_bottom)) => {
                out.push(min_left.ge(0));
                out.push(min_top.ge(0));
                out.push(doc_width.eq(max_right));
                out.push(doc_height.eq(max_bottom));
            }
            // No shapes: an empty viewport rather than a failed fold.
            _ => {
                out.push(doc_width.eq(0));
                out.push(doc_height.eq(0));
            }
        }
    }

    fn extract(&self, model: &Model) -> Result<Layout, DocumentError> {
        let mut primitives = Vec::with_capacity(self.shapes.len());
        for shape in &self.shapes {
            let style = Style::outlined(shape.fill());
            let primitive = match shape.kind() {
                ShapeKind::Rect => Primitive::Rect {
                    x: model_value(model, shape.attr("x"))?,
                    y: model_value(model, shape.attr("y"))?,
                    width: model_value(model, shape.attr("width"))?,
                    height: model_value(model, shape.attr("height"))?,
                    style,
                },
                ShapeKind::Circle => Primitive::Circle {
                    cx: model_value(model, shape.attr("center_x"))?,
                    cy: model_value(model, shape.attr("center_y"))?,
                    radius: model_value(model, shape.attr("radius"))?,
                    style,
                },
            };
            primitives.push(primitive);
        }

        let viewport = Viewport {
            min_x: 0,
            min_y: 0,
            width: model_value(model, Var::attr(DOC_ID, "width"))?,
            height: model_value(model, Var::attr(DOC_ID, "height"))?,
        };
        Ok(Layout {
            viewport,
            primitives,
            model: model.clone(),
        })
    }
}

fn model_value(model: &Model, var: Var) -> Result<i64, DocumentError> {
    model
        .value(&var)
        .ok_or_else(|| SolverError::Internal(format!("model has no value for {var}")).into())
}

/// Builder for a rectangle; the Rust rendition of the factory's optional
/// keyword arguments.
pub struct RectBuilder<'a> {
    doc: &'a mut Document,
    id: String,
    fill: Option<String>,
    x: Option<i64>,
    y: Option<i64>,
    width: Option<i64>,
    height: Option<i64>,
    labels: BTreeMap<String, LabelValue>,
}

impl<'a> RectBuilder<'a> {
    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn x(mut self, value: i64) -> Self {
        self.x = Some(value);
        self
    }

    pub fn y(mut self, value: i64) -> Self {
        self.y = Some(value);
        self
    }

    pub fn width(mut self, value: i64) -> Self {
        self.width = Some(value);
        self
    }

    pub fn height(mut self, value: i64) -> Self {
        self.height = Some(value);
        self
    }

    pub fn label(mut self, key: impl Into<String>, value: impl Into<LabelValue>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Register the shape, pin any supplied attributes, and add the
    /// rectangle's defining equations.
    pub fn finish(self) -> Result<Shape, DocumentError> {
        let shape = self
            .doc
            .register(self.id, ShapeKind::Rect, self.fill, self.labels)?;

        if let Some(value) = self.x {
            self.doc.require(shape.x().eq(value));
        }
        if let Some(value) = self.y {
            self.doc.require(shape.y().eq(value));
        }
        if let Some(value) = self.width {
            self.doc.require(shape.width().eq(value));
        }
        if let Some(value) = self.height {
            self.doc.require(shape.height().eq(value));
        }

        // The rectangle contract: these hold whether or not anything above
        // was pinned.
        self.doc.require(shape.left().eq(shape.x()));
        self.doc.require(shape.right().eq(shape.left() + shape.width()));
        self.doc.require(shape.top().eq(shape.y()));
        self.doc.require(shape.bottom().eq(shape.top() + shape.height()));

        Ok(shape)
    }
}

/// Builder for a circle.
pub struct CircleBuilder<'a> {
    doc: &'a mut Document,
    id: String,
    fill: Option<String>,
    center_x: Option<i64>,
    center_y: Option<i64>,
    radius: Option<i64>,
    labels: BTreeMap<String, LabelValue>,
}

impl<'a> CircleBuilder<'a> {
    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn center_x(mut self, value: i64) -> Self {
        self.center_x = Some(value);
        self
    }

    pub fn center_y(mut self, value: i64) -> Self {
        self.center_y = Some(value);
        self
    }

    pub fn radius(mut self, value: i64) -> Self {
        self.radius = Some(value);
        self
    }

    pub fn label(mut self, key: impl Into<String>, value: impl Into<LabelValue>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Register the shape, pin any supplied attributes, and add the
    /// circle's defining equations. The rectangle-style bounding box and
    /// the center/radius equations deliberately over-determine each other;
    /// the solver treats the whole set as ordinary conjunction.
    pub fn finish(self) -> Result<Shape, DocumentError> {
        let shape = self
            .doc
            .register(self.id, ShapeKind::Circle, self.fill, self.labels)?;

        if let Some(value) = self.center_x {
            self.doc.require(shape.center_x().eq(value));
        }
        if let Some(value) = self.center_y {
            self.doc.require(shape.center_y().eq(value));
        }
        if let Some(value) = self.radius {
            self.doc.require(shape.radius().eq(value));
        }

        self.doc.require(shape.left().eq(shape.x()));
        self.doc.require(shape.right().eq(shape.left() + shape.width()));
        self.doc.require(shape.top().eq(shape.y()));
        self.doc.require(shape.bottom().eq(shape.top() + shape.height()));

        // A circle's bounding box is square.
        self.doc.require(shape.width().eq(shape.height()));

        self.doc
            .require(shape.left().eq(shape.center_x() - shape.radius()));
        self.doc
            .require(shape.top().eq(shape.center_y() - shape.radius()));
        self.doc
            .require(shape.right().eq(shape.center_x() + shape.radius()));
        self.doc
            .require(shape.bottom().eq(shape.center_y() + shape.radius()));

        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Relation;
    use std::collections::HashMap;

    /// Fake solver for exercising expansion logic decoupled from actual
    /// constraint satisfaction. Reports every system satisfiable with an
    /// all-zero model.
    struct RecordingSolver {
        added: Vec<Constraint>,
    }

    impl RecordingSolver {
        fn new() -> Self {
            RecordingSolver { added: Vec::new() }
        }
    }

    impl Solver for RecordingSolver {
        fn add(&mut self, constraint: Constraint) {
            self.added.push(constraint);
        }

        fn check(&mut self) -> Result<Feasibility, SolverError> {
            Ok(Feasibility::Satisfiable)
        }

        fn model(&self) -> Result<Model, SolverError> {
            let mut values = HashMap::new();
            for constraint in &self.added {
                constraint.visit_vars(&mut |var| {
                    values.insert(var.name().to_string(), 0);
                });
            }
            Ok(Model::from_values(values))
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut doc = Document::new();
        doc.rect("box").finish().unwrap();
        let err = doc.rect("box").finish().unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateId { id } if id == "box"));
        assert_eq!(doc.shapes().len(), 1);
    }

    #[test]
    fn test_invalid_ids_rejected() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.rect("").finish(),
            Err(DocumentError::InvalidId { .. })
        ));
        assert!(matches!(
            doc.rect("a__b").finish(),
            Err(DocumentError::InvalidId { .. })
        ));
        assert!(matches!(
            doc.rect("doc").finish(),
            Err(DocumentError::InvalidId { .. })
        ));
        assert!(doc.shapes().is_empty());
    }

    #[test]
    fn test_rect_factory_pins_only_supplied_attributes() {
        let mut doc = Document::new();
        doc.rect("box").x(0).width(10).finish().unwrap();

        let pins: Vec<String> = doc
            .constraints()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert!(pins.contains(&"box__x == 0".to_string()));
        assert!(pins.contains(&"box__width == 10".to_string()));
        assert!(!pins.iter().any(|c| c.starts_with("box__y ==")));
        assert!(!pins.iter().any(|c| c.starts_with("box__height ==")));

        // The contract equations are always present.
        assert!(pins.contains(&"box__left == box__x".to_string()));
        assert!(pins.contains(&"box__right == (box__left + box__width)".to_string()));
    }

    #[test]
    fn test_circle_factory_adds_overdetermined_equations() {
        let mut doc = Document::new();
        doc.circle("ball").center_x(60).center_y(60).finish().unwrap();

        let constraints: Vec<String> = doc
            .constraints()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert!(constraints.contains(&"ball__width == ball__height".to_string()));
        assert!(
            constraints.contains(&"ball__left == (ball__center_x - ball__radius)".to_string())
        );
        assert!(
            constraints.contains(&"ball__bottom == (ball__center_y + ball__radius)".to_string())
        );
    }

    #[test]
    fn test_pairs_rule_expands_over_ordered_distinct_pairs() {
        let mut doc = Document::new();
        for id in ["a", "b", "c"] {
            doc.rect(id).finish().unwrap();
        }
        doc.when_pairs(|a, b| {
            assert_ne!(a.id(), b.id());
            true
        })
        .then(|a, b| (a.left() + b.left()).ge(-1000));

        let mut solver = RecordingSolver::new();
        doc.solve_with(&mut solver).unwrap();

        let expanded = solver
            .added
            .iter()
            .filter(|c| c.rel == Relation::Ge && c.rhs == Expr::Const(-1000))
            .count();
        assert_eq!(expanded, 6);
    }

    #[test]
    fn test_each_rule_expands_over_every_shape() {
        let mut doc = Document::new();
        for id in ["a", "b", "c", "d"] {
            doc.rect(id).finish().unwrap();
        }
        doc.when_each(|_| false)
            .then(|s| s.left().ge(-1000))
            .otherwise(|s| s.top().ge(-2000));

        let mut solver = RecordingSolver::new();
        doc.solve_with(&mut solver).unwrap();

        let then_count = solver
            .added
            .iter()
            .filter(|c| c.rhs == Expr::Const(-1000))
            .count();
        let otherwise_count = solver
            .added
            .iter()
            .filter(|c| c.rhs == Expr::Const(-2000))
            .count();
        assert_eq!(then_count, 0);
        assert_eq!(otherwise_count, 4);
    }

    #[test]
    fn test_solving_does_not_grow_the_stored_constraint_set() {
        let mut doc = Document::new();
        doc.rect("a").x(0).y(0).width(10).height(10).finish().unwrap();
        doc.when_each(|_| true).then(|s| s.width().ge(1));

        let before = doc.constraints().len();
        let mut first = RecordingSolver::new();
        doc.solve_with(&mut first).unwrap();
        let mut second = RecordingSolver::new();
        doc.solve_with(&mut second).unwrap();

        assert_eq!(doc.constraints().len(), before);
        assert_eq!(first.added.len(), second.added.len());
    }

    #[test]
    fn test_bounds_added_after_rule_expansion() {
        let mut doc = Document::new();
        doc.rect("a").finish().unwrap();
        doc.when_each(|_| true).then(|s| s.width().ge(1));

        let mut solver = RecordingSolver::new();
        doc.solve_with(&mut solver).unwrap();

        let descriptions: Vec<String> =
            solver.added.iter().map(|c| c.to_string()).collect();
        let expansion = descriptions
            .iter()
            .position(|c| c == "a__width >= 1")
            .expect("expanded rule constraint present");
        let bounds = descriptions
            .iter()
            .position(|c| c == "doc__width == a__right")
            .expect("bound constraint present");
        assert!(expansion < bounds);
    }

    #[test]
    fn test_empty_document_solves_to_empty_viewport() {
        let doc = Document::new();
        let layout = doc.solve().unwrap();
        assert!(layout.primitives.is_empty());
        assert_eq!(
            layout.viewport,
            Viewport {
                min_x: 0,
                min_y: 0,
                width: 0,
                height: 0
            }
        );
    }

    #[test]
    fn test_primitives_follow_insertion_order() {
        let mut doc = Document::new();
        doc.rect("first").x(0).y(0).width(5).height(5).finish().unwrap();
        doc.circle("second")
            .center_x(20)
            .center_y(20)
            .radius(5)
            .finish()
            .unwrap();

        let layout = doc.solve().unwrap();
        assert_eq!(layout.primitives.len(), 2);
        assert!(matches!(layout.primitives[0], Primitive::Rect { .. }));
        assert!(matches!(
            layout.primitives[1],
            Primitive::Circle { cx: 20, cy: 20, radius: 5, .. }
        ));
    }
}
