//! Core types shared across the mechwatch crates.

mod clock;
mod geometry;
mod theme;

pub use clock::ClockAngles;
pub use geometry::{Point, Transform};
pub use theme::{ColorTheme, TimeFormat};
