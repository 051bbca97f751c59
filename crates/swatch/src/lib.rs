// Pixel loops index three channels at once; ranges read better than iterators here.
#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! swatch: dominant color extraction with perceptual roles
//!
//! Reduces an image to a handful of representative colors and assigns them
//! to six named roles (vibrant, muted, and their light and dark variants).
//! The output is meant for theming: picking background and accent colors
//! that fit a picture.
//!
//! # Quick Start
//!
//! ```
//! use swatch::{PaletteBuilder, SwatchRole};
//!
//! let rgba = [40u8, 60, 200, 255].repeat(64);
//! let palette = PaletteBuilder::new().extract_rgba(&rgba, 8, 8).unwrap();
//!
//! for (role, swatch) in palette.iter() {
//!     println!("{role}: {}", swatch.rgb);
//! }
//! assert!(palette.get(SwatchRole::Vibrant).is_some());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! RGBA8 buffer
//!     |
//!     v
//! [sample every n-th pixel, drop transparent and near-white]
//!     |
//!     v
//! [MMCQ quantization]      5-bit histogram, median cut, <= 64 colors
//!     |
//!     v
//! [role generator]         HSL windows + weighted score per role
//!     |
//!     v
//! Palette                  role -> Option<Swatch>
//! ```
//!
//! A palette may legitimately have no roles at all (for example an image
//! made only of mid-saturation extremes); callers decide what to do then.

pub mod api;
pub mod color;
pub mod palette;
pub mod quantize;

pub use api::{PaletteBuilder, SwatchError};
pub use color::{Hsl, Rgb};
pub use palette::{Palette, ParseColorError, Swatch, SwatchRole};
pub use quantize::QuantizedColor;
