//! Cosmetic pointer-driven tilt of the whole watch face.

use mechwatch_core::Point;
use ratatui::layout::{Position, Rect};
use tracing::debug;

/// Largest tilt about either axis, in degrees.
pub const MAX_TILT_DEG: f64 = 12.0;

/// Degrees of tilt about the horizontal axis per row dragged.
const PITCH_PER_ROW: f64 = 1.5;

/// Degrees of tilt about the vertical axis per row dragged.
const YAW_PER_ROW: f64 = -0.9;

/// Two-axis tilt applied to the rendered face.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    /// Rotation about the horizontal axis, degrees.
    pub rotate_x: f64,
    /// Rotation about the vertical axis, degrees.
    pub rotate_y: f64,
}

impl Tilt {
    /// Orthographic projection of a face point after both rotations.
    pub fn project(&self, point: Point) -> Point {
        let (sin_x, cos_x) = self.rotate_x.to_radians().sin_cos();
        let (sin_y, cos_y) = self.rotate_y.to_radians().sin_cos();
        let depth = point.y * sin_x;
        Point::new(point.x * cos_y + depth * sin_y, point.y * cos_x)
    }
}

/// Tracks vertical drags on the control region.
#[derive(Debug, Default)]
pub struct TiltTracker {
    region: Option<Rect>,
    last_row: Option<u16>,
    accumulated: f64,
}

impl TiltTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the area drags must start in (it moves with the layout).
    pub fn set_region(&mut self, region: Rect) {
        self.region = Some(region);
    }

    pub fn is_dragging(&self) -> bool {
        self.last_row.is_some()
    }

    /// Pointer pressed; starts a drag only inside the control region.
    pub fn press(&mut self, column: u16, row: u16) {
        if self
            .region
            .is_some_and(|region| region.contains(Position::new(column, row)))
        {
            self.last_row = Some(row);
        }
    }

    /// Pointer moved with the button held.
    pub fn drag(&mut self, _column: u16, row: u16) {
        let Some(last) = self.last_row else {
            return;
        };
        let limit = MAX_TILT_DEG / PITCH_PER_ROW.abs().max(YAW_PER_ROW.abs());
        let delta = f64::from(row) - f64::from(last);
        self.accumulated = (self.accumulated + delta).clamp(-limit, limit);
        self.last_row = Some(row);
    }

    pub fn release(&mut self) {
        self.last_row = None;
    }

    /// Level the face again.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
        self.last_row = None;
        debug!("Reset tilt");
    }

    pub fn tilt(&self) -> Tilt {
        Tilt {
            rotate_x: (self.accumulated * PITCH_PER_ROW).clamp(-MAX_TILT_DEG, MAX_TILT_DEG),
            rotate_y: (self.accumulated * YAW_PER_ROW).clamp(-MAX_TILT_DEG, MAX_TILT_DEG),
        }
    }
}
