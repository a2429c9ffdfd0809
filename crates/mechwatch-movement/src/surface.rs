//! The rendering surface the movement draws onto.

use mechwatch_core::{Point, Transform};

/// A renderable shape in a handle's local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Closed outline; the last point joins the first.
    Polygon(Vec<Point>),
    /// Solid disk.
    Disk { center: Point, radius: f64 },
}

/// Vector surface that groups primitives under movable handles.
///
/// Transforms are write-only from the movement's point of view: animation
/// state lives in the gear train and is never recovered from the surface.
pub trait RenderSurface {
    /// Register (or replace) the primitives drawn under `handle`.
    fn register(&mut self, handle: &str, primitives: Vec<Primitive>);

    /// Whether `handle` has been registered.
    fn contains(&self, handle: &str) -> bool;

    /// Overwrite the transform of `handle`. Unknown handles are ignored.
    fn set_transform(&mut self, handle: &str, transform: Transform);

    /// Drop `handle` and its primitives.
    fn remove(&mut self, handle: &str);
}
