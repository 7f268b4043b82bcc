//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the overlay.
//! Types here should have no rendering or page dependencies
//! to avoid circular dependencies.

pub mod element;
pub mod geometry;
pub mod tool;

pub use element::*;
pub use geometry::*;
pub use tool::*;
