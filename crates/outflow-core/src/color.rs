//! Color handling for Outflow diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and [`Rgb`], the plain `[0, 1]` RGB triple in which
//! flow colours are supplied by callers.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;
use serde::Deserialize;

/// Wrapper around the `DynamicColor` type from the color crate
/// This provides convenience methods for working with colors in the Outflow project
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use outflow_core::color::Color;
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

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use outflow_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

/// An RGB triple with every channel in `[0, 1]`.
///
/// Deserializes from a three-element array, e.g. `[0.8, 0.2, 0.1]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f32; 3]")]
pub struct Rgb {
    red: f32,
    green: f32,
    blue: f32,
}

impl Rgb {
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    pub fn red(self) -> f32 {
        self.red
    }

    pub fn green(self) -> f32 {
        self.green
    }

    pub fn blue(self) -> f32 {
        self.blue
    }

    /// Returns `true` if all three channels lie within `[0, 1]`.
    pub fn is_normalized(self) -> bool {
        [self.red, self.green, self.blue]
            .iter()
            .all(|channel| (0.0..=1.0).contains(channel))
    }

    /// Converts the triple into a [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if any channel lies outside `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use outflow_core::color::Rgb;
    ///
    /// let color = Rgb::new(1.0, 0.5, 0.0).to_color().unwrap();
    /// assert_eq!(color.alpha(), 1.0);
    /// assert!(Rgb::new(1.5, 0.0, 0.0).to_color().is_err());
    /// ```
    pub fn to_color(self) -> Result<Color, String> {
        if !self.is_normalized() {
            return Err(format!(
                "rgb channels must lie in [0, 1], got ({}, {}, {})",
                self.red, self.green, self.blue
            ));
        }
        let to_byte = |channel: f32| (channel * 255.0).round() as u8;
        Color::new(&format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue)
        ))
    }
}

impl From<[f32; 3]> for Rgb {
    fn from([red, green, blue]: [f32; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        let transparent = color.with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }

    #[test]
    fn test_rgb_to_color_matches_hex() {
        let from_rgb = Rgb::new(1.0, 0.0, 0.0).to_color().unwrap();
        let from_hex = Color::new("#ff0000").unwrap();
        assert_eq!(from_rgb, from_hex);
    }

    #[test]
    fn test_rgb_out_of_range() {
        assert!(!Rgb::new(-0.1, 0.0, 0.0).is_normalized());
        assert!(!Rgb::new(0.0, 0.0, 1.01).is_normalized());
        assert!(Rgb::new(0.0, 1.0, 0.5).is_normalized());

        let err = Rgb::new(0.0, 2.0, 0.0).to_color().unwrap_err();
        assert!(err.contains("[0, 1]"));
    }

    #[test]
    fn test_rgb_from_array() {
        let rgb = Rgb::from([0.25, 0.5, 0.75]);
        assert_eq!(rgb.red(), 0.25);
        assert_eq!(rgb.green(), 0.5);
        assert_eq!(rgb.blue(), 0.75);
    }
}
