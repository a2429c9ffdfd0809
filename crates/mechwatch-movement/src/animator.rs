//! Time-driven mesh animation.
//!
//! Each frame the minute angle drives the pinion directly, every visible gear
//! chases the angle implied by its mesh ratio with the pinion, and the clock
//! hands track real time regardless of the pause state.

use mechwatch_core::{ClockAngles, Point, Transform};
use tracing::{debug, info};

use crate::dial::{HOUR_HAND_ID, MINUTE_HAND_ID, SECOND_HAND_ID};
use crate::error::{MovementError, MovementResult};
use crate::surface::RenderSurface;
use crate::train::{GearTrain, PlacedGear, build_train};

/// Fraction of the remaining distance a gear covers each frame.
///
/// Per frame, not per second: apparent speed follows the display refresh rate.
pub const SMOOTHING: f64 = 0.14;

/// Whether gear rotations follow the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Running,
    Paused,
}

impl Mode {
    pub fn toggle(self) -> Self {
        match self {
            Mode::Running => Mode::Paused,
            Mode::Paused => Mode::Running,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Running => "RUNNING",
            Mode::Paused => "PAUSED",
        }
    }
}

/// Rotation a meshed gear should show for a given pinion rotation.
///
/// Meshing gears turn against their driver, hence the sign flip.
pub fn mesh_target(pinion_rotation: f64, pinion_teeth: u32, teeth: u32) -> f64 {
    -pinion_rotation * (f64::from(pinion_teeth) / f64::from(teeth))
}

/// One step of exponential smoothing from `current` towards `target`.
pub fn smooth(current: f64, target: f64, alpha: f64) -> f64 {
    current + (target - current) * alpha
}

/// Animation state owned by whoever drives the frame loop.
#[derive(Debug)]
pub struct AnimatorState {
    train: GearTrain,
    mode: Mode,
    angles: ClockAngles,
}

impl AnimatorState {
    /// Wrap a built train, checking that every handle the animator drives exists.
    pub fn new<S: RenderSurface + ?Sized>(train: GearTrain, surface: &S) -> MovementResult<Self> {
        for handle in [MINUTE_HAND_ID, HOUR_HAND_ID]
            .into_iter()
            .chain(train.handles())
        {
            if !surface.contains(handle) {
                return Err(MovementError::MissingHandle(handle.to_string()));
            }
        }

        Ok(Self {
            train,
            mode: Mode::default(),
            angles: ClockAngles::default(),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Flip between running and paused, returning the new mode.
    pub fn toggle(&mut self) -> Mode {
        self.mode = self.mode.toggle();
        debug!(mode = self.mode.label(), "Toggled gear animation");
        self.mode
    }

    /// Hand angles from the most recent frame.
    pub fn angles(&self) -> ClockAngles {
        self.angles
    }

    pub fn train(&self) -> &GearTrain {
        &self.train
    }

    pub fn pinion_rotation(&self) -> f64 {
        self.train.pinion.rotation()
    }

    /// Current rotation of each visible gear, by handle.
    pub fn rotations(&self) -> impl Iterator<Item = (&str, f64)> {
        self.train.gears.iter().map(|g| (g.id(), g.rotation()))
    }

    /// Rotation of the gear registered under `id`, pinion included.
    pub fn rotation_of(&self, id: &str) -> Option<f64> {
        self.train
            .gears
            .iter()
            .chain(std::iter::once(&self.train.pinion))
            .find(|g| g.id() == id)
            .map(PlacedGear::rotation)
    }

    /// Throw the train away and build it again; rotations restart from zero.
    pub fn rebuild<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> MovementResult<()> {
        self.train = build_train(surface)?;
        info!("Rebuilt gear train");
        Ok(())
    }

    /// Advance one frame.
    pub fn step<S: RenderSurface + ?Sized>(&mut self, angles: ClockAngles, surface: &mut S) {
        self.angles = angles;

        surface.set_transform(MINUTE_HAND_ID, Transform::new(Point::ORIGIN, angles.minute));
        surface.set_transform(HOUR_HAND_ID, Transform::new(Point::ORIGIN, angles.hour));
        if surface.contains(SECOND_HAND_ID) {
            surface.set_transform(
                SECOND_HAND_ID,
                Transform::new(Point::ORIGIN, angles.second),
            );
        }

        if self.mode == Mode::Paused {
            return;
        }

        let pinion = &mut self.train.pinion;
        pinion.set_rotation(angles.minute);
        surface.set_transform(pinion.id(), pinion.transform());

        let pinion_rotation = pinion.rotation();
        let pinion_teeth = pinion.tooth_count();
        for gear in &mut self.train.gears {
            let target = mesh_target(pinion_rotation, pinion_teeth, gear.tooth_count());
            gear.set_rotation(smooth(gear.rotation(), target, SMOOTHING));
            surface.set_transform(gear.id(), gear.transform());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasSurface;
    use crate::dial::register_dial;
    use chrono::NaiveTime;

    fn setup() -> (AnimatorState, CanvasSurface) {
        let mut surface = CanvasSurface::new();
        register_dial(&mut surface);
        let train = build_train(&mut surface).expect("train builds");
        let animator = AnimatorState::new(train, &surface).expect("handles present");
        (animator, surface)
    }

    fn angles_at(h: u32, m: u32, s: u32) -> ClockAngles {
        let time = NaiveTime::from_hms_opt(h, m, s).expect("valid time");
        ClockAngles::from_time(&time)
    }

    fn snapshot(animator: &AnimatorState) -> Vec<u64> {
        animator.rotations().map(|(_, r)| r.to_bits()).collect()
    }

    #[test]
    fn test_mesh_target_ratio_and_sign() {
        assert_eq!(mesh_target(93.0, 10, 10), -93.0);
        assert!((mesh_target(44.0, 10, 44) + 10.0).abs() < 1e-12);
        assert!((mesh_target(-28.0, 10, 14) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_smooth_moves_fraction_of_gap() {
        assert!((smooth(0.0, 100.0, SMOOTHING) - 14.0).abs() < 1e-12);
        assert_eq!(smooth(5.0, 5.0, SMOOTHING), 5.0);
    }

    #[test]
    fn test_pinion_follows_minute_hand_without_lag() {
        let (mut animator, mut surface) = setup();
        let angles = angles_at(10, 15, 30);
        animator.step(angles, &mut surface);

        assert_eq!(animator.pinion_rotation(), angles.minute);
        assert_eq!(
            surface.transform(MINUTE_HAND_ID).map(|t| t.rotation_deg),
            Some(93.0)
        );
        assert_eq!(
            surface.transform(HOUR_HAND_ID).map(|t| t.rotation_deg),
            Some(angles.hour)
        );
    }

    #[test]
    fn test_first_frame_moves_gears_by_smoothing_factor() {
        let (mut animator, mut surface) = setup();
        animator.step(angles_at(10, 15, 30), &mut surface);

        let g1 = animator.rotation_of("g1").expect("g1 exists");
        let expected = -93.0 * (10.0 / 44.0) * SMOOTHING;
        assert!((g1 - expected).abs() < 1e-9);
        assert_eq!(
            surface.transform("g1"),
            Some(Transform::new(animator.train().gears[0].center(), g1))
        );
    }

    #[test]
    fn test_paused_gears_freeze_while_hands_move() {
        let (mut animator, mut surface) = setup();
        for s in 0..5 {
            animator.step(angles_at(10, 15, s), &mut surface);
        }

        assert_eq!(animator.toggle(), Mode::Paused);
        let frozen = snapshot(&animator);
        let frozen_pinion = animator.pinion_rotation().to_bits();
        let frozen_g2 = surface.transform("g2");

        for s in 10..40 {
            let angles = angles_at(10, 20, s);
            animator.step(angles, &mut surface);
            assert_eq!(snapshot(&animator), frozen);
            assert_eq!(animator.pinion_rotation().to_bits(), frozen_pinion);
            assert_eq!(surface.transform("g2"), frozen_g2);
            assert_eq!(animator.angles(), angles);
            assert_eq!(
                surface.transform(MINUTE_HAND_ID).map(|t| t.rotation_deg),
                Some(angles.minute)
            );
        }

        assert_eq!(animator.toggle(), Mode::Running);
        animator.step(angles_at(10, 20, 40), &mut surface);
        assert_ne!(snapshot(&animator), frozen);
    }

    #[test]
    fn test_smoothing_converges_on_constant_target() {
        let (mut animator, mut surface) = setup();
        let angles = angles_at(10, 15, 30);
        let targets: Vec<f64> = animator
            .train()
            .gears
            .iter()
            .map(|g| mesh_target(angles.minute, 10, g.tooth_count()))
            .collect();

        let mut previous: Vec<f64> = targets.iter().map(|t| t.abs()).collect();
        let mut frames = 0;
        while frames < 80 {
            animator.step(angles, &mut surface);
            frames += 1;
            let gaps: Vec<f64> = animator
                .rotations()
                .zip(&targets)
                .map(|((_, r), t)| (r - t).abs())
                .collect();
            for (gap, prev) in gaps.iter().zip(&previous) {
                assert!(gap < prev, "gap did not shrink on frame {frames}");
            }
            if gaps.iter().all(|gap| *gap < 0.01) {
                break;
            }
            previous = gaps;
        }
        assert!(frames < 80, "did not converge within 80 frames");
    }

    #[test]
    fn test_unit_gap_closes_within_forty_frames() {
        let mut current = 1.0;
        let mut gap = 1.0;
        let mut frames = 0;
        while gap >= 0.01 {
            current = smooth(current, 0.0, SMOOTHING);
            let next: f64 = current.abs();
            assert!(next < gap, "gap grew on frame {frames}");
            gap = next;
            frames += 1;
            assert!(frames <= 40, "gap {gap} still open after 40 frames");
        }
    }

    #[test]
    fn test_gears_turn_against_pinion() {
        let (mut animator, mut surface) = setup();
        for _ in 0..10 {
            animator.step(angles_at(3, 40, 0), &mut surface);
        }
        let pinion_sign = animator.pinion_rotation().signum();
        assert_eq!(pinion_sign, 1.0);
        for (id, rotation) in animator.rotations() {
            assert_eq!(rotation.signum(), -pinion_sign, "{id} turns with the pinion");
        }
    }

    #[test]
    fn test_missing_hand_fails_fast() {
        let mut surface = CanvasSurface::new();
        let train = build_train(&mut surface).expect("train builds");
        let err = AnimatorState::new(train, &surface).unwrap_err();
        assert!(matches!(err, MovementError::MissingHandle(ref h) if h == MINUTE_HAND_ID));
    }

    #[test]
    fn test_second_hand_is_optional() {
        let mut surface = CanvasSurface::new();
        register_dial(&mut surface);
        surface.remove(SECOND_HAND_ID);
        let train = build_train(&mut surface).expect("train builds");
        let mut animator = AnimatorState::new(train, &surface).expect("hands present");

        animator.step(angles_at(1, 2, 3), &mut surface);
        assert!(!surface.contains(SECOND_HAND_ID));
    }

    #[test]
    fn test_rebuild_resets_rotations() {
        let (mut animator, mut surface) = setup();
        animator.step(angles_at(8, 30, 0), &mut surface);
        assert!(animator.rotations().any(|(_, r)| r != 0.0));

        animator.rebuild(&mut surface).expect("rebuild");
        assert!(animator.rotations().all(|(_, r)| r == 0.0));
        assert_eq!(animator.train().gears.len(), 3);
    }
}
