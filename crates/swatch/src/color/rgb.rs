//! 8-bit sRGB color type

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// Perceptual luminance weights (ITU-R BT.601 luma coefficients).
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// An 8-bit sRGB color.
///
/// `Display` renders the CSS functional form without spaces, e.g.
/// `rgb(12,34,56)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Weighted brightness `0.299 R + 0.587 G + 0.114 B`, in 0.0..=255.0.
    ///
    /// # Example
    /// ```
    /// use swatch::Rgb;
    /// assert_eq!(Rgb::new(0, 0, 0).luminance(), 0.0);
    /// assert!((Rgb::new(255, 255, 255).luminance() - 255.0).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn luminance(self) -> f32 {
        self.r as f32 * LUMA_WEIGHTS[0]
            + self.g as f32 * LUMA_WEIGHTS[1]
            + self.b as f32 * LUMA_WEIGHTS[2]
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive,
    /// surrounding whitespace ignored).
    ///
    /// ```
    /// use swatch::Rgb;
    ///
    /// let navy: Rgb = "#1a1a2e".parse().unwrap();
    /// assert_eq!(navy, Rgb::new(0x1a, 0x1a, 0x2e));
    ///
    /// let black: Rgb = "#000".parse().unwrap();
    /// assert_eq!(black, Rgb::new(0, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
