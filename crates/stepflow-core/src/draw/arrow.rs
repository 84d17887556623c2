//! Downward connectors between consecutive steps.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Canvas, Drawable, StrokeDefinition},
    geometry::Point,
};

/// Visual definition of an arrow: its stroke and arrowhead dimensions.
#[derive(Debug, Clone)]
pub struct ArrowDefinition {
    stroke: StrokeDefinition,
    head_width: f32,
    head_height: f32,
    shaft_gap: f32,
}

impl ArrowDefinition {
    /// Creates an arrow definition with the default head geometry.
    pub fn new(stroke: StrokeDefinition) -> Self {
        Self {
            stroke,
            ..Self::default()
        }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    /// Width of the arrowhead's base.
    pub fn head_width(&self) -> f32 {
        self.head_width
    }

    /// Distance from the arrowhead's base to its tip.
    pub fn head_height(&self) -> f32 {
        self.head_height
    }

    /// How far short of the tip the shaft stops.
    pub fn shaft_gap(&self) -> f32 {
        self.shaft_gap
    }
}

impl Default for ArrowDefinition {
    fn default() -> Self {
        Self {
            stroke: StrokeDefinition::new(
                Color::new("#333333").expect("'#333333' is a valid CSS color"),
                2.0,
            ),
            head_width: 12.0,
            head_height: 10.0,
            shaft_gap: 8.0,
        }
    }
}

/// A vertical arrow of fixed length pointing down.
///
/// The position passed to [`Drawable::draw`] is the top of the shaft; the
/// tip lands `length` pixels below it.
#[derive(Debug, Clone)]
pub struct Arrow<'a> {
    definition: &'a ArrowDefinition,
    length: f32,
}

impl<'a> Arrow<'a> {
    pub fn new(definition: &'a ArrowDefinition, length: f32) -> Self {
        Self { definition, length }
    }

    /// Returns the three corners of the arrowhead for an arrow starting at `start`.
    pub fn head_points(&self, start: Point) -> [Point; 3] {
        let tip_y = start.y() + self.length;
        let base_y = tip_y - self.definition.head_height();
        let half_base = self.definition.head_width() / 2.0;
        [
            Point::new(start.x(), tip_y),
            Point::new(start.x() - half_base, base_y),
            Point::new(start.x() + half_base, base_y),
        ]
    }
}

impl Drawable for Arrow<'_> {
    fn draw(&self, canvas: &mut Canvas, position: Point) {
        let stroke = self.definition.stroke();

        let shaft = svg_element::Line::new()
            .set("x1", position.x())
            .set("y1", position.y())
            .set("x2", position.x())
            .set("y2", position.y() + self.length - self.definition.shaft_gap());
        canvas.add(apply_stroke!(shaft, stroke));

        let points = self
            .head_points(position)
            .iter()
            .map(|point| format!("{},{}", point.x(), point.y()))
            .collect::<Vec<_>>()
            .join(" ");
        let head = svg_element::Polygon::new()
            .set("points", points)
            .set("fill", stroke.color().to_hex())
            .set("fill-opacity", stroke.color().alpha());
        canvas.add(head);
    }
}
