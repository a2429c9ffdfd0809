//! Recurring per-frame task with an explicit cancellation handle.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

use chrono::NaiveTime;
use mechwatch_core::ClockAngles;
use tracing::debug;

use crate::animator::AnimatorState;
use crate::surface::RenderSurface;

/// Source of the current time of day.
pub trait TimeSource {
    fn now(&self) -> NaiveTime;
}

/// Wall-clock local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

impl<F: Fn() -> NaiveTime> TimeSource for F {
    fn now(&self) -> NaiveTime {
        self()
    }
}

/// Stops a [`FrameLoop`] at its next step. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Drives an [`AnimatorState`] one frame at a time from a [`TimeSource`].
#[derive(Debug)]
pub struct FrameLoop<T> {
    source: T,
    cancel: CancelHandle,
    frames: u64,
}

impl<T: TimeSource> FrameLoop<T> {
    pub fn new(source: T) -> Self {
        Self {
            source,
            cancel: CancelHandle::default(),
            frames: 0,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame. Breaks, without touching the animator, once cancelled.
    pub fn step<S: RenderSurface + ?Sized>(
        &mut self,
        animator: &mut AnimatorState,
        surface: &mut S,
    ) -> ControlFlow<()> {
        if self.cancel.is_cancelled() {
            debug!(frames = self.frames, "Frame loop cancelled");
            return ControlFlow::Break(());
        }

        let angles = ClockAngles::from_time(&self.source.now());
        animator.step(angles, surface);
        self.frames += 1;
        ControlFlow::Continue(())
    }
}
