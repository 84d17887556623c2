//! Text measurement, wrapping, and rendering.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`TextMeasurer`] - Pixel-width measurement of a string in a given style
//! - [`CosmicTextMeasurer`] - The production measurer, backed by cosmic-text
//! - [`wrap_text`] - Greedy word wrap against a measured width
//! - [`Text`] - A drawable block of lines
//!
//! Layout code only ever talks to [`TextMeasurer`], so wrapping can be tested
//! against a deterministic fake without any fonts installed.

use std::borrow::Cow;

use cosmic_text::{Attrs, Buffer, Family, Metrics, Shaping, Weight};
use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Color,
    draw::{Canvas, Drawable, fonts},
    geometry::Point,
};

/// Defines the visual style for text elements in diagrams.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `14` px |
/// | Bold | `false` |
/// | Color | black |
/// | Line height | `18` px |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    bold: bool,
    color: Color,
    line_height: f32,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the font family (e.g., "Arial", "DejaVu Sans").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the distance between the baselines of consecutive lines.
    pub fn set_line_height(&mut self, line_height: f32) {
        self.line_height = line_height;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 14.0,
            bold: false,
            color: Color::default(),
            line_height: 18.0,
        }
    }
}

/// Measures the rendered width of a single line of text.
///
/// Implementations must be deterministic for a given input: the same text and
/// definition always measure the same width.
pub trait TextMeasurer: Send + Sync {
    /// Returns the advance width of `text` in pixels when set in `definition`.
    fn measure(&self, text: &str, definition: &TextDefinition) -> f32;
}

/// [`TextMeasurer`] backed by cosmic-text shaping of the system fonts.
///
/// All instances share one process-wide `FontSystem`, whose face database is
/// also the one the canvas rasterizes with. Font discovery runs once.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosmicTextMeasurer;

impl CosmicTextMeasurer {
    pub fn new() -> Self {
        Self
    }
}

impl TextMeasurer for CosmicTextMeasurer {
    fn measure(&self, text: &str, definition: &TextDefinition) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let mut font_system = fonts::font_system();

        let metrics = Metrics::new(definition.font_size(), definition.line_height());
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let weight = if definition.bold() {
            Weight::BOLD
        } else {
            Weight::NORMAL
        };
        let attrs = Attrs::new()
            .family(Family::Name(definition.font_family()))
            .weight(weight);

        // Unbounded width keeps the whole string on one layout line.
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(None, |max: Option<f32>, run_width| {
                Some(max.map_or(run_width, |max| max.max(run_width)))
            });

        // No runs means no usable font; approximate with an average advance.
        width.unwrap_or_else(|| text.chars().count() as f32 * definition.font_size() * 0.55)
    }
}

/// Greedily wraps `text` into lines no wider than `max_width`.
///
/// The text is split on whitespace. Words are appended to the current line
/// while the measured width of the line stays within `max_width`; the first
/// word that would overflow starts a new line. There is no re-balancing,
/// hyphenation, or shrinking. A single word wider than `max_width` is kept
/// whole on its own line and overflows.
///
/// Because line breaks only depend on the word sequence, wrapping the
/// newline-joined output again reproduces the same lines.
///
/// # Examples
///
/// ```
/// use stepflow_core::draw::{TextDefinition, TextMeasurer, wrap_text};
///
/// struct CharCount;
///
/// impl TextMeasurer for CharCount {
///     fn measure(&self, text: &str, _: &TextDefinition) -> f32 {
///         text.chars().count() as f32
///     }
/// }
///
/// let def = TextDefinition::new();
/// let lines = wrap_text(&CharCount, "review the signed contract", &def, 12.0);
/// assert_eq!(lines, ["review the", "signed", "contract"]);
/// ```
pub fn wrap_text<M>(
    measurer: &M,
    text: &str,
    definition: &TextDefinition,
    max_width: f32,
) -> Vec<String>
where
    M: TextMeasurer + ?Sized,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measurer.measure(&candidate, definition) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Horizontal alignment of text relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Lines start at the position.
    Start,
    /// Lines are centered on the position.
    #[default]
    Middle,
}

impl TextAnchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// Vertical alignment of text relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// The first line's alphabetic baseline sits on the position.
    Alphabetic,
    /// The whole block of lines is vertically centered on the position.
    #[default]
    Central,
}

/// A drawable block of pre-wrapped lines sharing one [`TextDefinition`].
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    lines: Vec<String>,
    anchor: TextAnchor,
    baseline: TextBaseline,
}

impl<'a> Text<'a> {
    /// Creates a text block from already-wrapped lines.
    ///
    /// Characters that XML 1.0 cannot carry (control characters other than
    /// tab, line feed, and carriage return, and U+FFFE/U+FFFF) are dropped.
    pub fn new(definition: &'a TextDefinition, lines: Vec<String>) -> Self {
        let lines = lines
            .into_iter()
            .map(|line| match xml_safe(&line) {
                Cow::Borrowed(_) => line,
                Cow::Owned(cleaned) => cleaned,
            })
            .collect();
        Self {
            definition,
            lines,
            anchor: TextAnchor::default(),
            baseline: TextBaseline::default(),
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the y coordinate of each line for a block positioned at `position_y`.
    ///
    /// For [`TextBaseline::Central`] these are line centers, for
    /// [`TextBaseline::Alphabetic`] they are baselines.
    pub fn line_offsets(&self, position_y: f32) -> Vec<f32> {
        let line_height = self.definition.line_height();
        let first = match self.baseline {
            TextBaseline::Alphabetic => position_y,
            TextBaseline::Central => {
                let total_height = self.lines.len() as f32 * line_height;
                position_y - total_height / 2.0 + line_height / 2.0
            }
        };
        (0..self.lines.len())
            .map(|index| first + index as f32 * line_height)
            .collect()
    }
}

/// Removes the characters that may not appear in an XML document.
fn xml_safe(line: &str) -> Cow<'_, str> {
    fn allowed(ch: char) -> bool {
        match ch {
            '\t' | '\n' | '\r' => true,
            '\u{FFFE}' | '\u{FFFF}' => false,
            _ => ch >= ' ',
        }
    }

    if line.chars().all(allowed) {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(line.chars().filter(|&ch| allowed(ch)).collect())
    }
}

impl Drawable for Text<'_> {
    fn draw(&self, canvas: &mut Canvas, position: Point) {
        if self.lines.is_empty() {
            return;
        }

        let color = self.definition.color();
        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("text-anchor", self.anchor.to_svg_value())
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size())
            .set("fill", color.to_hex())
            .set("fill-opacity", color.alpha());

        if self.definition.bold() {
            rendered_text = rendered_text.set("font-weight", "bold");
        }
        if self.baseline == TextBaseline::Central {
            rendered_text = rendered_text.set("dominant-baseline", "central");
        }

        for (line, y) in self.lines.iter().zip(self.line_offsets(position.y())) {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("y", y)
                .add(SvgText::new(line.as_str()));
            rendered_text = rendered_text.add(tspan);
        }

        canvas.add(rendered_text);
    }
}
