//! CSS gradient values.
//!
//! Every type renders to CSS through `Display`. The output format is fixed:
//! `rgb(r,g,b)` without spaces, stop positions as integer percentages, and
//! angles without a trailing `.0`.

use std::fmt;
use swatch::Rgb;

/// A color as it appears in a gradient stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssColor {
    Rgb(Rgb),
    /// The given color at zero alpha
    Transparent(Rgb),
    /// Literal hex notation such as `#1a1a2e`
    Hex(&'static str),
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssColor::Rgb(rgb) => write!(f, "{rgb}"),
            CssColor::Transparent(rgb) => write!(f, "rgba({},{},{}, 0)", rgb.r, rgb.g, rgb.b),
            CssColor::Hex(hex) => f.write_str(hex),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: CssColor,
    pub position_pct: u8,
}

impl ColorStop {
    pub fn new(color: CssColor, position_pct: u8) -> Self {
        Self {
            color,
            position_pct,
        }
    }
}

/// A CSS `linear-gradient(...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub angle_deg: f32,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(angle_deg: f32, stops: Vec<ColorStop>) -> Self {
        Self { angle_deg, stops }
    }
}

impl fmt::Display for LinearGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linear-gradient({}deg", self.angle_deg)?;
        for stop in &self.stops {
            write!(f, ", {} {}%", stop.color, stop.position_pct)?;
        }
        f.write_str(")")
    }
}

/// Value of a layer's `background` property.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    None,
    Linear(LinearGradient),
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::None => f.write_str("none"),
            Background::Linear(gradient) => write!(f, "{gradient}"),
        }
    }
}

/// Backgrounds for the color layers of one image.
///
/// `wash` is `Some` only for variants that have a wash layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedLayers {
    pub color: Background,
    pub wash: Option<Background>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_stop_gradient() {
        let gradient = LinearGradient::new(
            180.0,
            vec![
                ColorStop::new(CssColor::Rgb(Rgb::new(40, 40, 60)), 0),
                ColorStop::new(CssColor::Rgb(Rgb::new(20, 20, 40)), 50),
                ColorStop::new(CssColor::Rgb(Rgb::new(0, 0, 0)), 100),
            ],
        );
        assert_eq!(
            gradient.to_string(),
            "linear-gradient(180deg, rgb(40,40,60) 0%, rgb(20,20,40) 50%, rgb(0,0,0) 100%)"
        );
    }

    #[test]
    fn test_fractional_angle_and_hex() {
        let gradient = LinearGradient::new(
            60.64,
            vec![
                ColorStop::new(CssColor::Hex("#000"), 0),
                ColorStop::new(CssColor::Hex("#1a1a2e"), 100),
            ],
        );
        assert_eq!(
            gradient.to_string(),
            "linear-gradient(60.64deg, #000 0%, #1a1a2e 100%)"
        );
    }

    #[test]
    fn test_transparent_stop() {
        let light = Rgb::new(200, 180, 160);
        let gradient = LinearGradient::new(
            0.0,
            vec![
                ColorStop::new(CssColor::Rgb(light), 0),
                ColorStop::new(CssColor::Transparent(light), 100),
            ],
        );
        assert_eq!(
            gradient.to_string(),
            "linear-gradient(0deg, rgb(200,180,160) 0%, rgba(200,180,160, 0) 100%)"
        );
    }

    #[test]
    fn test_background_none() {
        assert_eq!(Background::None.to_string(), "none");
    }
}
