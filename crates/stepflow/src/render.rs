//! Drawing a laid-out diagram onto a canvas and encoding it.

use std::{fmt, sync::Arc};

use log::{debug, info};

use stepflow_core::{
    color::Color,
    draw::{
        Arrow, ArrowDefinition, Canvas, CosmicTextMeasurer, Drawable, Oval, OvalDefinition,
        RasterOptions, StrokeDefinition, Text, TextAnchor, TextBaseline, TextDefinition,
        TextMeasurer,
    },
    geometry::Size,
};

use crate::{
    config::{AppConfig, SectionStyle, StyleConfig},
    error::RenderError,
    layout::{LayoutGeometry, canvas_height},
    request::{DiagramRequest, SectionKind},
};

/// A rendered diagram: PNG bytes and the pixel dimensions they decode to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl RenderedDiagram {
    /// The encoded PNG image.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Consumes the diagram, returning the encoded PNG image.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Renders `request` with the default configuration and system fonts.
///
/// # Errors
///
/// See [`DiagramBuilder::render`].
pub fn render(request: &DiagramRequest) -> Result<RenderedDiagram, RenderError> {
    DiagramBuilder::default().render(request)
}

/// Renders diagrams with a fixed configuration and text measurer.
///
/// A builder holds no per-render state and may be shared across threads;
/// each call to [`DiagramBuilder::render`] allocates its own canvas.
///
/// # Examples
///
/// ```rust,no_run
/// use stepflow::{DiagramBuilder, DiagramRequest, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let request = DiagramRequest::new(
///     "Customer Onboarding Process",
///     vec!["Receive customer application".to_string()],
///     vec!["Send automated welcome email".to_string()],
/// );
///
/// let diagram = builder.render(&request).expect("Failed to render");
/// std::fs::write(request.output_file_name(), diagram.bytes()).unwrap();
/// ```
#[derive(Clone)]
pub struct DiagramBuilder {
    config: AppConfig,
    measurer: Arc<dyn TextMeasurer>,
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl fmt::Debug for DiagramBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DiagramBuilder {
    /// Create a new diagram builder measuring text with the system fonts.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            measurer: Arc::new(CosmicTextMeasurer::new()),
        }
    }

    /// Replaces the text measurer used for wrapping step labels.
    pub fn with_measurer<M>(mut self, measurer: M) -> Self
    where
        M: TextMeasurer + 'static,
    {
        self.measurer = Arc::new(measurer);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render a diagram request to a PNG image.
    ///
    /// The canvas size is computed and the surface allocated before anything
    /// is drawn. Drawing then proceeds strictly top to bottom: background,
    /// title, and each section's header, ovals, and arrows.
    ///
    /// # Errors
    ///
    /// - [`RenderError::InvalidInput`] if the title is blank.
    /// - [`RenderError::Config`] if the configuration is inconsistent.
    /// - [`RenderError::SurfaceAllocation`] if the canvas is too large (or empty) to allocate.
    /// - [`RenderError::Scene`] if the drawn scene cannot be rasterized.
    /// - [`RenderError::Encoding`] if the raster cannot be encoded.
    pub fn render(&self, request: &DiagramRequest) -> Result<RenderedDiagram, RenderError> {
        request.validate()?;

        let layout_config = self.config.layout();
        layout_config.validate().map_err(RenderError::Config)?;
        let palette = Palette::from_config(&self.config)?;

        let width = layout_config.canvas_width();
        let height = canvas_height(
            request.manual_steps.len(),
            request.automation_steps.len(),
            layout_config,
        );
        info!(
            manual_steps = request.manual_steps.len(),
            automation_steps = request.automation_steps.len(),
            width,
            height;
            "Rendering diagram"
        );

        let surface_height =
            u32::try_from(height).map_err(|_| RenderError::SurfaceAllocation { width, height })?;
        let mut canvas = Canvas::new(width, surface_height)?;

        let geometry = LayoutGeometry::compute(request, layout_config);
        debug_assert_eq!((geometry.width, geometry.height), (width, height));

        canvas.fill(palette.background);
        self.draw(&mut canvas, request, &geometry, &palette);

        let bytes = canvas.encode_png(&RasterOptions::new(self.config.style().font_family()))?;
        info!(bytes = bytes.len(); "Diagram rendered");

        Ok(RenderedDiagram {
            bytes,
            width,
            height: surface_height,
        })
    }

    fn draw(
        &self,
        canvas: &mut Canvas,
        request: &DiagramRequest,
        geometry: &LayoutGeometry<'_>,
        palette: &Palette,
    ) {
        let measurer = self.measurer.as_ref();

        Text::new(&palette.title, vec![request.title.clone()])
            .with_baseline(TextBaseline::Alphabetic)
            .draw(canvas, geometry.title_anchor);

        let arrow_definition = ArrowDefinition::new(palette.stroke.clone());
        for section in &geometry.sections {
            let section_palette = palette.section(section.kind);

            Text::new(&section_palette.header, vec![section.kind.label().to_string()])
                .with_anchor(TextAnchor::Start)
                .with_baseline(TextBaseline::Alphabetic)
                .draw(canvas, section.header_anchor);

            // Arrow `i` joins step `i` to step `i + 1`.
            for (index, step) in section.steps.iter().enumerate() {
                let oval = Oval::new(&section_palette.oval, step.label, measurer);
                debug!(label = step.label, lines = oval.lines().len(); "Drawing step");
                oval.draw(canvas, step.bounds.center());

                if let Some(arrow) = section.arrows.get(index) {
                    Arrow::new(&arrow_definition, arrow.length).draw(canvas, arrow.start);
                }
            }
        }
    }
}

/// Resolved drawing styles of one section.
struct SectionPalette {
    header: TextDefinition,
    oval: OvalDefinition,
}

/// Every style a render needs, resolved from [`AppConfig`] once per render.
struct Palette {
    background: Color,
    stroke: StrokeDefinition,
    title: TextDefinition,
    manual: SectionPalette,
    automation: SectionPalette,
}

impl Palette {
    fn from_config(config: &AppConfig) -> Result<Self, RenderError> {
        let style = config.style();
        let layout = config.layout();

        let text_color = style.text_color().map_err(RenderError::Config)?;
        let stroke = StrokeDefinition::new(
            style.stroke_color().map_err(RenderError::Config)?,
            style.stroke_width(),
        );

        let mut title = base_text(style, text_color);
        title.set_font_size(style.title_font_size());
        title.set_bold(true);

        let mut step_text = base_text(style, text_color);
        step_text.set_font_size(style.step_font_size());
        step_text.set_line_height(style.step_line_height());

        let mut oval = OvalDefinition::new(Size::new(
            layout.oval_width() as f32,
            layout.oval_height() as f32,
        ));
        oval.set_stroke(stroke.clone());
        oval.set_text(step_text);
        oval.set_text_margin(layout.text_margin() as f32);

        let section = |section_style: &SectionStyle| -> Result<SectionPalette, RenderError> {
            let mut header = base_text(style, text_color);
            header.set_font_size(style.header_font_size());
            header.set_bold(true);
            header.set_color(section_style.accent_color().map_err(RenderError::Config)?);

            let mut oval = oval.clone();
            oval.set_fill_color(section_style.fill_color().map_err(RenderError::Config)?);
            Ok(SectionPalette { header, oval })
        };

        Ok(Self {
            background: style.background_color().map_err(RenderError::Config)?,
            manual: section(style.manual())?,
            automation: section(style.automation())?,
            stroke,
            title,
        })
    }

    fn section(&self, kind: SectionKind) -> &SectionPalette {
        match kind {
            SectionKind::Manual => &self.manual,
            SectionKind::Automation => &self.automation,
        }
    }
}

fn base_text(style: &StyleConfig, color: Color) -> TextDefinition {
    let mut text = TextDefinition::new();
    text.set_font_family(style.font_family());
    text.set_color(color);
    text
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::config::LayoutConfig;

    struct FixedAdvance(f32);

    impl TextMeasurer for FixedAdvance {
        fn measure(&self, text: &str, _definition: &TextDefinition) -> f32 {
            text.chars().count() as f32 * self.0
        }
    }

    #[test]
    fn test_palette_uses_section_colors() {
        let palette = Palette::from_config(&AppConfig::default()).unwrap();
        assert_eq!(palette.background.to_hex(), "#ffffff");
        assert_eq!(palette.manual.header.color().to_hex(), "#1a56db");
        assert_eq!(palette.automation.header.color().to_hex(), "#047857");
        assert_eq!(palette.manual.oval.fill_color().to_hex(), "#ffffff");
        assert_eq!(palette.automation.oval.fill_color().to_hex(), "#f0fdf4");
        assert_eq!(palette.manual.oval.stroke().color().to_hex(), "#333333");
        assert!(palette.title.bold());
        assert_approx_eq!(f32, palette.title.font_size(), 24.0);
        assert_approx_eq!(f32, palette.manual.header.font_size(), 18.0);
        assert_approx_eq!(f32, palette.manual.oval.text().font_size(), 14.0);
        assert_approx_eq!(f32, palette.manual.oval.max_text_width(), 460.0);
    }

    #[test]
    fn test_draw_scene_order_and_content() {
        let builder = DiagramBuilder::default().with_measurer(FixedAdvance(7.0));
        let request = DiagramRequest::new(
            "Onboarding",
            vec!["Review documents".to_string(), "Verify identity".to_string()],
            vec!["Send welcome email".to_string()],
        );
        let config = LayoutConfig::default();
        let geometry = LayoutGeometry::compute(&request, &config);
        let palette = Palette::from_config(builder.config()).unwrap();

        let mut canvas = Canvas::new(800, 500).unwrap();
        builder.draw(&mut canvas, &request, &geometry, &palette);
        let scene = canvas.to_svg();

        assert_eq!(scene.matches("<ellipse").count(), 3);
        assert_eq!(scene.matches("<polygon").count(), 1);
        assert_eq!(scene.matches(r##"fill="#f0fdf4""##).count(), 1);

        let positions: Vec<usize> = [
            "Onboarding",
            "Manual Steps",
            "Review documents",
            "Verify identity",
            "Automation Steps",
            "Send welcome email",
        ]
        .iter()
        .map(|needle| scene.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
