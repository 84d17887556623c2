//! Drawable primitives for Stepflow diagrams.
//!
//! Every primitive draws itself onto a [`Canvas`] through the [`Drawable`]
//! trait. Positions are interpreted per primitive: shapes are positioned by
//! their center, arrows by the top of their shaft, and text by its anchor.

mod arrow;
mod canvas;
mod fonts;
mod oval;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDefinition};
pub use canvas::{Canvas, CanvasError, RasterOptions, SvgNode};
pub use oval::{Oval, OvalDefinition};
pub use stroke::StrokeDefinition;
pub use text::{
    CosmicTextMeasurer, Text, TextAnchor, TextBaseline, TextDefinition, TextMeasurer, wrap_text,
};

use crate::geometry::Point;

/// A visual element that paints itself onto a [`Canvas`].
pub trait Drawable {
    /// Paints this element with its reference point at `position`.
    fn draw(&self, canvas: &mut Canvas, position: Point);
}
