//! Public entry points: the [`PaletteBuilder`] and the unified error type.

mod builder;
mod error;

pub use builder::PaletteBuilder;
pub use error::SwatchError;
