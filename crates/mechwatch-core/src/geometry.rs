//! 2D points and rigid transforms in the watch face coordinate space.
//!
//! The space is y-down: positive y points towards six o'clock and a positive
//! rotation turns clockwise on screen.

use std::ops::{Add, Sub};

/// A point (or offset) in watch face units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the origin, `theta` radians from the +x axis.
    pub fn polar(radius: f64, theta: f64) -> Self {
        Self::new(radius * theta.cos(), radius * theta.sin())
    }

    /// Distance from the origin.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Rotation about the local origin followed by a translation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    /// Where the local origin lands.
    pub translation: Point,
    /// Clockwise rotation in degrees.
    pub rotation_deg: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Point::ORIGIN,
        rotation_deg: 0.0,
    };

    pub const fn new(translation: Point, rotation_deg: f64) -> Self {
        Self {
            translation,
            rotation_deg,
        }
    }

    /// Map a local point into the shared coordinate space.
    pub fn apply(&self, point: Point) -> Point {
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        Point::new(
            point.x * cos - point.y * sin,
            point.x * sin + point.y * cos,
        ) + self.translation
    }
}
