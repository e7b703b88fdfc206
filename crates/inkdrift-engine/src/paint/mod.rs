//! Paint model shared between the raster surface and GPU renderers.
//!
//! Colors are stored premultiplied; convert with [`Color::to_straight`] where
//! straight alpha is expected.

pub mod color;

pub use color::Color;
