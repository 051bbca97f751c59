//! Color types used by the quantizer and the role generator
//!
//! - [`Rgb`]: 8-bit sRGB triple, the input and output type of the crate.
//! - [`Hsl`]: hue/saturation/lightness view used to score swatch roles.
//!
//! # Example
//!
//! ```
//! use swatch::{Hsl, Rgb};
//!
//! let teal = Rgb::new(0, 128, 128);
//! let hsl = Hsl::from(teal);
//! assert!((hsl.h - 0.5).abs() < 1e-3);
//! assert_eq!(Rgb::from(hsl), teal);
//! ```

mod hsl;
mod rgb;

pub use hsl::Hsl;
pub use rgb::Rgb;
