use thiserror::Error;

/// Failures raised by the wheel model and the pure spin computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WheelError {
    #[error("slot count must be positive, got {0}")]
    InvalidSlotCount(usize),

    #[error("rotation must be a finite number of degrees, got {0}")]
    InvalidRotation(f64),

    #[error("wheel name must not be empty")]
    EmptyName,

    #[error("a wheel needs at least one non-blank label")]
    NoLabels,

    #[error("a wheel holds at most {max} labels, got {count}")]
    TooManyLabels { count: usize, max: usize },

    #[error("wheel {0} not found")]
    WheelNotFound(String),

    #[error("wheel index {index} out of range for {len} wheels")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("a spin is already in progress")]
    SpinInProgress,
}
