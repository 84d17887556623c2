//! Oval step shapes with wrapped, centered labels.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Canvas, Drawable, StrokeDefinition, Text, TextDefinition, TextMeasurer, wrap_text},
    geometry::{Point, Size},
};

/// Visual definition shared by every oval of one section.
#[derive(Debug, Clone)]
pub struct OvalDefinition {
    size: Size,
    fill_color: Color,
    stroke: StrokeDefinition,
    text: TextDefinition,
    text_margin: f32,
}

impl OvalDefinition {
    /// Creates a definition for ovals inscribed in a `size` bounding box.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn text(&self) -> &TextDefinition {
        &self.text
    }

    /// Returns the total horizontal space kept free of text inside the bounding box.
    pub fn text_margin(&self) -> f32 {
        self.text_margin
    }

    /// Returns the widest a label line may measure before it wraps.
    pub fn max_text_width(&self) -> f32 {
        self.size.width() - self.text_margin
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn set_stroke(&mut self, stroke: StrokeDefinition) {
        self.stroke = stroke;
    }

    pub fn set_text(&mut self, text: TextDefinition) {
        self.text = text;
    }

    pub fn set_text_margin(&mut self, margin: f32) {
        self.text_margin = margin;
    }
}

impl Default for OvalDefinition {
    fn default() -> Self {
        Self {
            size: Size::new(500.0, 80.0),
            fill_color: Color::new("white").expect("'white' is a valid CSS color"),
            stroke: StrokeDefinition::new(
                Color::new("#333333").expect("'#333333' is a valid CSS color"),
                2.0,
            ),
            text: TextDefinition::default(),
            text_margin: 40.0,
        }
    }
}

/// One step: an ellipse with its label wrapped to fit inside.
#[derive(Debug, Clone)]
pub struct Oval<'a> {
    definition: &'a OvalDefinition,
    label: Text<'a>,
}

impl<'a> Oval<'a> {
    /// Creates an oval, wrapping `label` against the definition's text width.
    pub fn new<M>(definition: &'a OvalDefinition, label: &str, measurer: &M) -> Self
    where
        M: TextMeasurer + ?Sized,
    {
        let lines = wrap_text(
            measurer,
            label,
            definition.text(),
            definition.max_text_width(),
        );
        Self {
            definition,
            label: Text::new(definition.text(), lines),
        }
    }

    /// Returns the wrapped label lines.
    pub fn lines(&self) -> &[String] {
        self.label.lines()
    }
}

impl Drawable for Oval<'_> {
    fn draw(&self, canvas: &mut Canvas, position: Point) {
        let size = self.definition.size();
        let ellipse = svg_element::Ellipse::new()
            .set("cx", position.x())
            .set("cy", position.y())
            .set("rx", size.width() / 2.0)
            .set("ry", size.height() / 2.0)
            .set("fill", self.definition.fill_color().to_hex())
            .set("fill-opacity", self.definition.fill_color().alpha());
        canvas.add(apply_stroke!(ellipse, self.definition.stroke()));

        self.label.draw(canvas, position);
    }
}
