//! Stylized gear silhouettes.
//!
//! A gear outline is sampled at four angular steps per tooth: rising flank,
//! tip, falling flank and an undercut root. The hub is a solid disk, there is
//! no bore.

use std::f64::consts::TAU;

use mechwatch_core::Point;
use tracing::warn;

use crate::surface::Primitive;

/// Fewest teeth that still produce a recognisable gear.
pub const MIN_TEETH: u32 = 3;

/// Flank radius as a fraction of the tooth depth above the inner radius.
const FLANK_DEPTH_RATIO: f64 = 0.45;

/// Root radius as a fraction of the inner radius.
const ROOT_RATIO: f64 = 0.68;

/// Largest hub radius as a fraction of the inner radius; keeps the hub inside the root.
const MAX_HUB_RATIO: f64 = 0.65;

/// Immutable gear outline centered on the local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct GearShape {
    tooth_count: u32,
    inner_radius: f64,
    tooth_depth: f64,
    center_radius: f64,
    vertices: Vec<Point>,
}

impl GearShape {
    pub fn tooth_count(&self) -> u32 {
        self.tooth_count
    }

    /// Tip radius.
    pub fn outer_radius(&self) -> f64 {
        self.inner_radius + self.tooth_depth
    }

    /// Hub disk radius after clamping.
    pub fn center_radius(&self) -> f64 {
        self.center_radius
    }

    /// Closed outline, four vertices per tooth.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Outline polygon plus hub disk, ready to register on a surface.
    pub fn primitives(&self) -> Vec<Primitive> {
        vec![
            Primitive::Polygon(self.vertices.clone()),
            Primitive::Disk {
                center: Point::ORIGIN,
                radius: self.center_radius,
            },
        ]
    }
}

/// Generate a gear outline.
///
/// Tooth counts below [`MIN_TEETH`] are raised to it, so degenerate input
/// still yields a closed polygon.
pub fn generate_gear(
    tooth_count: u32,
    inner_radius: f64,
    tooth_depth: f64,
    center_radius: f64,
) -> GearShape {
    let teeth = if tooth_count < MIN_TEETH {
        warn!(tooth_count, min = MIN_TEETH, "Raising degenerate gear tooth count");
        MIN_TEETH
    } else {
        tooth_count
    };

    let steps = 4 * teeth;
    let step_angle = TAU / f64::from(steps);
    let flank = inner_radius + FLANK_DEPTH_RATIO * tooth_depth;
    let tip = inner_radius + tooth_depth;
    let root = inner_radius * ROOT_RATIO;

    let vertices = (0..steps)
        .map(|i| {
            let radius = match i % 4 {
                0 | 2 => flank,
                1 => tip,
                _ => root,
            };
            Point::polar(radius, f64::from(i) * step_angle)
        })
        .collect();

    GearShape {
        tooth_count: teeth,
        inner_radius,
        tooth_depth,
        center_radius: center_radius.min(inner_radius * MAX_HUB_RATIO),
        vertices,
    }
}
