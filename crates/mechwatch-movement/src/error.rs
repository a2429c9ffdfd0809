//! Error types for building and driving the gear train.

use thiserror::Error;

/// Configuration errors detected when the train is built or the animator starts.
#[derive(Debug, Error)]
pub enum MovementError {
    /// A gear definition has too few teeth to mesh (zero would divide by zero).
    #[error("Gear `{id}` has {teeth} teeth (must be at least {min})")]
    ToothCount {
        /// Handle of the offending gear.
        id: String,
        /// Configured tooth count.
        teeth: u32,
        /// Smallest accepted tooth count.
        min: u32,
    },

    /// The render surface lacks a handle the animator drives.
    #[error("Render surface has no element named `{0}`")]
    MissingHandle(String),
}

/// Result type for movement operations.
pub type MovementResult<T> = std::result::Result<T, MovementError>;
