//! Backdrop - movie backdrops on a palette-matched stage
//!
//! Shows an uploaded image or a movie backdrop over color layers derived
//! from the image's own palette. This library exposes modules for
//! integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
