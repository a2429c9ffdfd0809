//! Gear movement for the mechwatch clock.
//!
//! This crate generates stylized gear outlines, lays out a fixed gear train
//! around a driving pinion, and animates it from wall-clock time: the
//! pinion follows the minute hand, each wheel chases the rotation its mesh
//! ratio implies, and a pause flag freezes the wheels while the hands keep
//! time. Drawing goes through the [`RenderSurface`] trait; [`CanvasSurface`]
//! renders onto a ratatui braille canvas.

mod animator;
mod canvas;
mod dial;
mod error;
mod frame_loop;
mod geometry;
mod surface;
mod tilt;
mod train;

pub use animator::{AnimatorState, Mode, SMOOTHING, mesh_target, smooth};
pub use canvas::{CanvasSurface, view_bounds};
pub use dial::{
    DIAL_ID, DIAL_RADIUS, HOUR_HAND_ID, MINUTE_HAND_ID, SECOND_HAND_ID, register_dial,
};
pub use error::{MovementError, MovementResult};
pub use frame_loop::{CancelHandle, FrameLoop, LocalTime, TimeSource};
pub use geometry::{GearShape, MIN_TEETH, generate_gear};
pub use surface::{Primitive, RenderSurface};
pub use tilt::{MAX_TILT_DEG, Tilt, TiltTracker};
pub use train::{
    GEAR_SPECS, GearSpec, GearTrain, PINION_HUB_RADIUS, PINION_ID, PINION_SPEC, PlacedGear,
    build_train, build_train_from, hub_radius,
};
