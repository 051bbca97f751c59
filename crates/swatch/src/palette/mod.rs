//! Palette types
//!
//! A [`Palette`] maps each [`SwatchRole`] to at most one [`Swatch`]. Roles are
//! filled by the generator from the quantizer's output; any subset may be
//! absent.

mod error;
mod generator;
mod palette;

pub use error::ParseColorError;
pub use generator::{generate, RoleTarget};
pub use palette::{Palette, Swatch, SwatchRole};
