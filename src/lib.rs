//! Select a region of a rendered page, annotate it and export it as a PNG

pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod page;
pub mod render;
pub mod session;
pub mod theme;
pub mod widget;
