//! Configuration types for Stepflow diagram rendering.
//!
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! configuration file only needs to name the values it changes. This holds
//! inside the `[style.manual]` and `[style.automation]` tables too: a color
//! left out there keeps that section's own default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Canvas, oval, spacing, and padding dimensions in pixels.
//! - [`StyleConfig`] - Fonts and colors.
//! - [`SectionStyle`] - Accent and fill colors of one section.
//!
//! # Example
//!
//! ```
//! # use stepflow::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().canvas_width(), 800);
//! assert!(config.style().manual().accent_color().is_ok());
//! ```

use serde::{Deserialize, Deserializer};

use stepflow_core::color::Color;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the style configuration for in-place overrides.
    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }
}

/// Diagram dimensions, all in pixels.
///
/// The defaults reproduce the standard diagram: an 800px wide canvas with
/// 500x80 ovals separated by 40px arrows.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    canvas_width: u32,
    oval_width: u32,
    oval_height: u32,
    step_margin: u32,
    section_spacing: u32,
    section_header_height: u32,
    padding_top: u32,
    padding_bottom: u32,
    text_margin: u32,
    title_baseline: u32,
    header_left_margin: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            oval_width: 500,
            oval_height: 80,
            step_margin: 40,
            section_spacing: 60,
            section_header_height: 40,
            padding_top: 80,
            padding_bottom: 40,
            text_margin: 40,
            title_baseline: 40,
            header_left_margin: 50,
        }
    }
}

impl LayoutConfig {
    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    pub fn oval_width(&self) -> u32 {
        self.oval_width
    }

    pub fn oval_height(&self) -> u32 {
        self.oval_height
    }

    /// Vertical gap between consecutive ovals of a section, spanned by an arrow.
    pub fn step_margin(&self) -> u32 {
        self.step_margin
    }

    /// Extra vertical gap inserted once between two sections.
    pub fn section_spacing(&self) -> u32 {
        self.section_spacing
    }

    pub fn section_header_height(&self) -> u32 {
        self.section_header_height
    }

    pub fn padding_top(&self) -> u32 {
        self.padding_top
    }

    pub fn padding_bottom(&self) -> u32 {
        self.padding_bottom
    }

    /// Total horizontal space inside an oval kept free of label text.
    pub fn text_margin(&self) -> u32 {
        self.text_margin
    }

    /// Baseline of the title, measured from the top of the canvas.
    pub fn title_baseline(&self) -> u32 {
        self.title_baseline
    }

    /// X position of the section header labels.
    pub fn header_left_margin(&self) -> u32 {
        self.header_left_margin
    }

    /// Horizontal offset that centers every oval on the canvas.
    pub fn left_padding(&self) -> u32 {
        self.canvas_width.saturating_sub(self.oval_width) / 2
    }

    pub fn set_canvas_width(&mut self, width: u32) {
        self.canvas_width = width;
    }

    pub fn set_oval_size(&mut self, width: u32, height: u32) {
        self.oval_width = width;
        self.oval_height = height;
    }

    pub fn set_step_margin(&mut self, margin: u32) {
        self.step_margin = margin;
    }

    pub fn set_section_spacing(&mut self, spacing: u32) {
        self.section_spacing = spacing;
    }

    /// Checks that the dimensions describe a drawable diagram.
    ///
    /// # Errors
    ///
    /// Returns a description of the first inconsistency found.
    pub fn validate(&self) -> Result<(), String> {
        if self.oval_width > self.canvas_width {
            return Err(format!(
                "oval width {} exceeds canvas width {}",
                self.oval_width, self.canvas_width
            ));
        }
        Ok(())
    }
}

/// Colors of one section: its header label and its oval fill.
#[derive(Debug, Clone)]
pub struct SectionStyle {
    accent_color: String,
    fill_color: String,
}

/// A section table as written in a configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SectionOverrides {
    accent_color: Option<String>,
    fill_color: Option<String>,
}

impl SectionStyle {
    /// Creates a section style from two CSS color strings.
    pub fn new(accent_color: &str, fill_color: &str) -> Self {
        Self {
            accent_color: accent_color.to_string(),
            fill_color: fill_color.to_string(),
        }
    }

    fn default_manual() -> Self {
        Self::new("#1a56db", "#ffffff")
    }

    fn default_automation() -> Self {
        Self::new("#047857", "#f0fdf4")
    }

    fn merged(mut self, overrides: SectionOverrides) -> Self {
        if let Some(accent_color) = overrides.accent_color {
            self.accent_color = accent_color;
        }
        if let Some(fill_color) = overrides.fill_color {
            self.fill_color = fill_color;
        }
        self
    }

    /// Returns the parsed header [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn accent_color(&self) -> Result<Color, String> {
        parse_color("accent_color", &self.accent_color)
    }

    /// Returns the parsed oval fill [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn fill_color(&self) -> Result<Color, String> {
        parse_color("fill_color", &self.fill_color)
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_family: String,
    title_font_size: f32,
    header_font_size: f32,
    step_font_size: f32,
    step_line_height: f32,
    background_color: String,
    text_color: String,
    stroke_color: String,
    stroke_width: f32,
    #[serde(deserialize_with = "manual_section")]
    manual: SectionStyle,
    #[serde(deserialize_with = "automation_section")]
    automation: SectionStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            title_font_size: 24.0,
            header_font_size: 18.0,
            step_font_size: 14.0,
            step_line_height: 18.0,
            background_color: "#ffffff".to_string(),
            text_color: "#000000".to_string(),
            stroke_color: "#333333".to_string(),
            stroke_width: 2.0,
            manual: SectionStyle::default_manual(),
            automation: SectionStyle::default_automation(),
        }
    }
}

impl StyleConfig {
    /// The single font family used for every piece of text.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn title_font_size(&self) -> f32 {
        self.title_font_size
    }

    pub fn header_font_size(&self) -> f32 {
        self.header_font_size
    }

    pub fn step_font_size(&self) -> f32 {
        self.step_font_size
    }

    pub fn step_line_height(&self) -> f32 {
        self.step_line_height
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Returns the parsed canvas background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Color, String> {
        parse_color("background_color", &self.background_color)
    }

    /// Returns the parsed title and step label [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn text_color(&self) -> Result<Color, String> {
        parse_color("text_color", &self.text_color)
    }

    /// Returns the parsed outline and arrow [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, String> {
        parse_color("stroke_color", &self.stroke_color)
    }

    pub fn manual(&self) -> &SectionStyle {
        &self.manual
    }

    pub fn automation(&self) -> &SectionStyle {
        &self.automation
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_background_color(&mut self, color: &str) {
        self.background_color = color.to_string();
    }

    pub fn set_automation(&mut self, style: SectionStyle) {
        self.automation = style;
    }
}

fn manual_section<'de, D>(deserializer: D) -> Result<SectionStyle, D::Error>
where
    D: Deserializer<'de>,
{
    SectionOverrides::deserialize(deserializer)
        .map(|o| SectionStyle::default_manual().merged(o))
}

fn automation_section<'de, D>(deserializer: D) -> Result<SectionStyle, D::Error>
where
    D: Deserializer<'de>,
{
    SectionOverrides::deserialize(deserializer)
        .map(|o| SectionStyle::default_automation().merged(o))
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.canvas_width(), 800);
        assert_eq!(layout.oval_width(), 500);
        assert_eq!(layout.oval_height(), 80);
        assert_eq!(layout.step_margin(), 40);
        assert_eq!(layout.section_spacing(), 60);
        assert_eq!(layout.section_header_height(), 40);
        assert_eq!(layout.padding_top(), 80);
        assert_eq!(layout.padding_bottom(), 40);
        assert_eq!(layout.text_margin(), 40);
        assert_eq!(layout.left_padding(), 150);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_layout_validate_rejects_wide_oval() {
        let mut layout = LayoutConfig::default();
        layout.set_oval_size(900, 80);
        assert!(layout.validate().unwrap_err().contains("exceeds canvas width"));
    }

    #[test]
    fn test_style_defaults_parse() {
        let style = StyleConfig::default();
        assert_eq!(style.background_color().unwrap().to_hex(), "#ffffff");
        assert_eq!(style.stroke_color().unwrap().to_hex(), "#333333");
        assert_eq!(style.manual().accent_color().unwrap().to_hex(), "#1a56db");
        assert_eq!(style.manual().fill_color().unwrap().to_hex(), "#ffffff");
        assert_eq!(style.automation().accent_color().unwrap().to_hex(), "#047857");
        assert_eq!(style.automation().fill_color().unwrap().to_hex(), "#f0fdf4");
    }

    #[test]
    fn test_partial_section_table_keeps_section_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"style": {"manual": {"accent_color": "red"}, "automation": {}}}"#,
        )
        .unwrap();
        let style = config.style();
        assert_eq!(style.manual().accent_color().unwrap().to_hex(), "#ff0000");
        assert_eq!(style.manual().fill_color().unwrap().to_hex(), "#ffffff");
        assert_eq!(style.automation().accent_color().unwrap().to_hex(), "#047857");
        assert_eq!(style.automation().fill_color().unwrap().to_hex(), "#f0fdf4");
    }

    #[test]
    fn test_style_invalid_color_names_field() {
        let mut style = StyleConfig::default();
        style.set_background_color("not-a-color");
        let err = style.background_color().unwrap_err();
        assert!(err.contains("background_color"), "{err}");
    }
}
