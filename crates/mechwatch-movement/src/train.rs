//! The fixed gear train: three visible wheels and the hidden driving pinion.

use std::sync::Arc;

use mechwatch_core::{Point, Transform};
use tracing::info;

use crate::error::{MovementError, MovementResult};
use crate::geometry::{GearShape, MIN_TEETH, generate_gear};
use crate::surface::RenderSurface;

/// Handle of the driving pinion.
pub const PINION_ID: &str = "pinion";

/// Hub radius of the pinion.
pub const PINION_HUB_RADIUS: f64 = 5.0;

/// One row of the train configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearSpec {
    pub id: &'static str,
    pub teeth: u32,
    pub inner_radius: f64,
    pub tooth_depth: f64,
    pub center: Point,
}

/// Visible gears, laid out for readable meshing rather than physical accuracy.
pub const GEAR_SPECS: [GearSpec; 3] = [
    GearSpec {
        id: "g1",
        teeth: 44,
        inner_radius: 64.0,
        tooth_depth: 9.0,
        center: Point::new(-28.0, 30.0),
    },
    GearSpec {
        id: "g2",
        teeth: 22,
        inner_radius: 34.0,
        tooth_depth: 7.0,
        center: Point::new(64.0, 20.0),
    },
    GearSpec {
        id: "g3",
        teeth: 14,
        inner_radius: 24.0,
        tooth_depth: 6.0,
        center: Point::new(38.0, -82.0),
    },
];

pub const PINION_SPEC: GearSpec = GearSpec {
    id: PINION_ID,
    teeth: 10,
    inner_radius: 8.0,
    tooth_depth: 4.0,
    center: Point::ORIGIN,
};

/// Hub radius for a visible gear.
pub fn hub_radius(inner_radius: f64) -> f64 {
    (0.28 * inner_radius).round().max(8.0)
}

/// A gear shape placed in the train, with its animated rotation.
#[derive(Debug, Clone)]
pub struct PlacedGear {
    id: String,
    shape: Arc<GearShape>,
    center: Point,
    current_rotation: f64,
}

impl PlacedGear {
    pub fn new(id: impl Into<String>, shape: Arc<GearShape>, center: Point) -> Self {
        Self {
            id: id.into(),
            shape,
            center,
            current_rotation: 0.0,
        }
    }

    /// Surface handle of this gear.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shape(&self) -> &GearShape {
        &self.shape
    }

    pub fn tooth_count(&self) -> u32 {
        self.shape.tooth_count()
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Rotation in degrees as of the last frame.
    pub fn rotation(&self) -> f64 {
        self.current_rotation
    }

    pub(crate) fn set_rotation(&mut self, degrees: f64) {
        self.current_rotation = degrees;
    }

    /// Placement and rotation as a surface transform.
    pub fn transform(&self) -> Transform {
        Transform::new(self.center, self.current_rotation)
    }
}

/// Visible gears plus the pinion that drives them.
#[derive(Debug, Clone)]
pub struct GearTrain {
    pub gears: Vec<PlacedGear>,
    pub pinion: PlacedGear,
}

impl GearTrain {
    /// Handles of every gear in the train, pinion last.
    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.gears
            .iter()
            .chain(std::iter::once(&self.pinion))
            .map(PlacedGear::id)
    }
}

/// Build the fixed train and register it on `surface`.
pub fn build_train<S: RenderSurface + ?Sized>(surface: &mut S) -> MovementResult<GearTrain> {
    build_train_from(&GEAR_SPECS, &PINION_SPEC, surface)
}

/// Build a train from explicit rows.
///
/// Every row is validated before the surface is touched. Handles already on
/// the surface under the same ids are replaced, so rebuilding is idempotent.
pub fn build_train_from<S: RenderSurface + ?Sized>(
    specs: &[GearSpec],
    pinion: &GearSpec,
    surface: &mut S,
) -> MovementResult<GearTrain> {
    if let Some(bad) = specs
        .iter()
        .chain(std::iter::once(pinion))
        .find(|spec| spec.teeth < MIN_TEETH)
    {
        return Err(MovementError::ToothCount {
            id: bad.id.to_string(),
            teeth: bad.teeth,
            min: MIN_TEETH,
        });
    }

    let gears: Vec<PlacedGear> = specs
        .iter()
        .map(|spec| place(spec, hub_radius(spec.inner_radius), surface))
        .collect();
    let pinion = place(pinion, PINION_HUB_RADIUS, surface);

    info!(
        gears = gears.len(),
        pinion_teeth = pinion.tooth_count(),
        "Built gear train"
    );

    Ok(GearTrain { gears, pinion })
}

fn place<S: RenderSurface + ?Sized>(spec: &GearSpec, hub: f64, surface: &mut S) -> PlacedGear {
    let shape = Arc::new(generate_gear(
        spec.teeth,
        spec.inner_radius,
        spec.tooth_depth,
        hub,
    ));
    let gear = PlacedGear::new(spec.id, shape, spec.center);

    surface.remove(spec.id);
    surface.register(spec.id, gear.shape().primitives());
    surface.set_transform(spec.id, gear.transform());
    gear
}
