//! PaletteBuilder -- the primary entry point for the crate.

use crate::api::SwatchError;
use crate::color::Rgb;
use crate::palette::{generate, Palette};
use crate::quantize::quantize;

const DEFAULT_QUALITY: usize = 5;
const DEFAULT_COLOR_COUNT: usize = 64;
const MIN_ALPHA: u8 = 125;
const WHITE_THRESHOLD: u8 = 250;

/// Palette extraction builder.
///
/// - `quality`: sample every n-th pixel (1 = every pixel)
/// - `color_count`: number of quantized colors the roles are chosen from
///
/// [`extract_rgba()`](Self::extract_rgba) takes `&self`, so one builder can be
/// reused across images.
///
/// # Example
///
/// ```
/// use swatch::{PaletteBuilder, SwatchRole};
///
/// // 2x1 image: one saturated red pixel, one dark blue pixel
/// let rgba = [230, 30, 30, 255, 10, 10, 110, 255];
/// let palette = PaletteBuilder::new()
///     .quality(1)
///     .extract_rgba(&rgba, 2, 1)
///     .unwrap();
///
/// assert!(palette.get(SwatchRole::Vibrant).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct PaletteBuilder {
    quality: usize,
    color_count: usize,
}

impl PaletteBuilder {
    pub fn new() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            color_count: DEFAULT_COLOR_COUNT,
        }
    }

    /// Sample every `step`-th pixel.
    #[inline]
    pub fn quality(mut self, step: usize) -> Self {
        self.quality = step;
        self
    }

    /// Number of colors to quantize to before role assignment.
    #[inline]
    pub fn color_count(mut self, count: usize) -> Self {
        self.color_count = count;
        self
    }

    /// Extract a palette from a tightly packed RGBA8 buffer.
    ///
    /// Pixels with alpha below 125 and near-white pixels are skipped.
    pub fn extract_rgba(&self, rgba: &[u8], width: u32, height: u32) -> Result<Palette, SwatchError> {
        self.validate()?;
        if width == 0 || height == 0 {
            return Err(SwatchError::EmptyImage);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SwatchError::DimensionMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        let pixels: Vec<Rgb> = rgba
            .chunks_exact(4)
            .step_by(self.quality)
            .filter(|px| px[3] >= MIN_ALPHA && !is_near_white(px[0], px[1], px[2]))
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();

        self.extract(&pixels)
    }

    /// Extract a palette from already-filtered opaque pixels.
    pub fn extract(&self, pixels: &[Rgb]) -> Result<Palette, SwatchError> {
        self.validate()?;
        if pixels.is_empty() {
            return Err(SwatchError::NoOpaquePixels);
        }

        let colors = quantize(pixels, self.color_count);
        Ok(generate(&colors))
    }

    fn validate(&self) -> Result<(), SwatchError> {
        if self.quality == 0 {
            return Err(SwatchError::InvalidOption("quality"));
        }
        if !(2..=256).contains(&self.color_count) {
            return Err(SwatchError::InvalidOption("color_count"));
        }
        Ok(())
    }
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_near_white(r: u8, g: u8, b: u8) -> bool {
    r > WHITE_THRESHOLD && g > WHITE_THRESHOLD && b > WHITE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::SwatchRole;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        rgba.repeat((width * height) as usize)
    }

    #[test]
    fn test_rejects_empty_image() {
        let result = PaletteBuilder::new().extract_rgba(&[], 0, 10);
        assert_eq!(result, Err(SwatchError::EmptyImage));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let result = PaletteBuilder::new().extract_rgba(&[0; 12], 2, 2);
        assert_eq!(
            result,
            Err(SwatchError::DimensionMismatch {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn test_rejects_bad_options() {
        let rgba = solid(2, 2, [10, 10, 10, 255]);
        assert_eq!(
            PaletteBuilder::new().quality(0).extract_rgba(&rgba, 2, 2),
            Err(SwatchError::InvalidOption("quality"))
        );
        assert_eq!(
            PaletteBuilder::new().color_count(1).extract_rgba(&rgba, 2, 2),
            Err(SwatchError::InvalidOption("color_count"))
        );
    }

    #[test]
    fn test_transparent_and_white_pixels_are_skipped() {
        let mut rgba = solid(4, 4, [255, 255, 255, 255]);
        rgba.extend(solid(4, 4, [200, 30, 30, 0]));
        let result = PaletteBuilder::new().quality(1).extract_rgba(&rgba, 4, 8);
        assert_eq!(result, Err(SwatchError::NoOpaquePixels));
    }

    #[test]
    fn test_solid_red_image() {
        let rgba = solid(16, 16, [220, 30, 30, 255]);
        let palette = PaletteBuilder::new().extract_rgba(&rgba, 16, 16).unwrap();

        let vibrant = palette.rgb(SwatchRole::Vibrant).unwrap();
        assert!(vibrant.r > 200 && vibrant.g < 50 && vibrant.b < 50);
    }

    #[test]
    fn test_builder_is_reusable() {
        let builder = PaletteBuilder::new().quality(1);
        let a = builder
            .extract_rgba(&solid(2, 2, [220, 30, 30, 255]), 2, 2)
            .unwrap();
        let b = builder
            .extract_rgba(&solid(2, 2, [30, 30, 220, 255]), 2, 2)
            .unwrap();
        assert_ne!(a, b);
    }
}
