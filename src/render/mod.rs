// src/render/mod.rs
//! Strip-chart rendering of generated leads

pub mod window;

pub use window::{window, DrawPoint, StripRenderer, StripWindow};
