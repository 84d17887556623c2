//! The raster drawing surface.
//!
//! A [`Canvas`] owns a freshly allocated pixmap plus the scene of vector nodes
//! painted onto it. Drawables append to the scene through `&mut Canvas`;
//! [`Canvas::encode_png`] consumes the canvas, rasterizes the scene into the
//! pixmap with resvg, and returns the encoded PNG bytes. Nothing outlives the
//! call that created the canvas.

use log::debug;
use svg::{Document, Node};
use thiserror::Error;
use tiny_skia::{Pixmap, Transform};

use crate::{color::Color, draw::fonts};

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Failures of the drawing surface.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("cannot allocate a {width}x{height} pixel surface")]
    Allocation { width: u32, height: u32 },

    #[error("failed to rasterize scene: {0}")]
    Scene(String),

    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

/// Options that control how a scene is rasterized.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    font_family: String,
}

impl RasterOptions {
    /// Creates raster options with `font_family` as the fallback family for text.
    pub fn new(font_family: &str) -> Self {
        Self {
            font_family: font_family.to_string(),
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self::new("Arial")
    }
}

/// A fixed-size raster surface being painted.
///
/// # Examples
///
/// ```
/// use stepflow_core::color::Color;
/// use stepflow_core::draw::{Canvas, RasterOptions};
///
/// let mut canvas = Canvas::new(64, 32).unwrap();
/// canvas.fill(Color::new("white").unwrap());
/// let png = canvas.encode_png(&RasterOptions::default()).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
#[derive(Debug)]
pub struct Canvas {
    pixmap: Pixmap,
    document: Document,
}

impl Canvas {
    /// The largest surface, in pixels, a canvas will allocate (1 GiB of RGBA).
    pub const MAX_PIXELS: u64 = 1 << 28;

    /// Allocates a transparent canvas of `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Allocation`] if either dimension is zero or the
    /// surface would exceed [`Canvas::MAX_PIXELS`].
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        if u64::from(width) * u64::from(height) > Self::MAX_PIXELS {
            return Err(CanvasError::Allocation { width, height });
        }
        let pixmap = Pixmap::new(width, height).ok_or(CanvasError::Allocation { width, height })?;
        debug!(width, height; "Canvas allocated");

        let document = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        Ok(Self { pixmap, document })
    }

    /// Paints every pixel of the surface with `color`.
    pub fn fill(&mut self, color: Color) {
        let [r, g, b, a] = color.to_rgba8();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    /// Appends a node to the scene, above everything added before it.
    pub fn add<T>(&mut self, node: T)
    where
        T: Into<SvgNode>,
    {
        self.document.append(node);
    }

    /// Returns the scene painted so far as an SVG document.
    pub fn to_svg(&self) -> String {
        self.document.to_string()
    }

    /// Rasterizes the scene onto the surface and encodes it as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Scene`] if the scene cannot be parsed for
    /// rasterization and [`CanvasError::Encode`] if PNG encoding fails.
    pub fn encode_png(mut self, options: &RasterOptions) -> Result<Vec<u8>, CanvasError> {
        let scene = self.to_svg();

        let mut usvg_options = usvg::Options::default();
        usvg_options.fontdb = fonts::font_database();
        usvg_options.font_family = options.font_family().to_string();

        let tree = usvg::Tree::from_str(&scene, &usvg_options)
            .map_err(|err| CanvasError::Scene(err.to_string()))?;
        resvg::render(&tree, Transform::identity(), &mut self.pixmap.as_mut());

        let png = self
            .pixmap
            .encode_png()
            .map_err(|err| CanvasError::Encode(err.to_string()))?;
        debug!(bytes = png.len(); "Canvas encoded");
        Ok(png)
    }
}
