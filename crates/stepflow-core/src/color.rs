//! Color handling for Stepflow diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, providing convenience methods for emitting colors
//! into the scene handed to the rasterizer.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepflow_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the opaque sRGB value of this color as `#rrggbb`.
    ///
    /// The alpha channel is reported separately by [`Color::alpha`] so the
    /// output stays parseable by every SVG consumer.
    ///
    /// ```
    /// use stepflow_core::color::Color;
    ///
    /// assert_eq!(Color::new("red").unwrap().to_hex(), "#ff0000");
    /// ```
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Returns the sRGB channels of this color as 8-bit `[r, g, b, a]`.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }

    /// Returns the alpha component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default_is_black() {
        assert_eq!(Color::default().to_hex(), "#000000");
    }

    #[test]
    fn test_color_to_hex_round_trips_hex_input() {
        for hex in ["#1a56db", "#047857", "#f0fdf4", "#333333", "#ffffff"] {
            assert_eq!(Color::new(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn test_color_to_rgba8() {
        assert_eq!(
            Color::new("#f0fdf4").unwrap().to_rgba8(),
            [0xf0, 0xfd, 0xf4, 0xff]
        );
    }

    #[test]
    fn test_color_alpha() {
        assert!((Color::new("red").unwrap().alpha() - 1.0).abs() < 0.001);
        let translucent = Color::new("rgba(255, 0, 0, 0.5)").unwrap();
        assert!((translucent.alpha() - 0.5).abs() < 0.001);
        assert_eq!(translucent.to_hex(), "#ff0000");
    }

    #[test]
    fn test_color_display_matches_hex() {
        let color = Color::new("blue").unwrap();
        assert_eq!(color.to_string(), "#0000ff");
    }

    #[test]
    fn test_color_eq() {
        assert_eq!(Color::new("#ff0000").unwrap(), Color::new("#ff0000").unwrap());
        assert_ne!(Color::new("red").unwrap(), Color::new("blue").unwrap());
    }
}
