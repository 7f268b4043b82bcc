//! Annotation rendering module
//!
//! This module contains:
//! - The viewport-sized raster surface (dim layer, selection hole, ink)
//! - Text rasterization using ab_glyph
//! - Font lookup for the text tool's families

pub mod fonts;
pub mod surface;
pub mod text;

pub use fonts::FontBook;
pub use surface::RasterSurface;
