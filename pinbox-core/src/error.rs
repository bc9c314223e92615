use thiserror::Error;

/// Errors raised by the layout engine at the point of an invalid assignment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The length-filter target must be at least one slot
    #[error("code length must be at least 1, got {0}")]
    InvalidCodeLength(usize),

    /// Slot padding must be a non-negative finite number of pixels
    #[error("slot padding must be non-negative, got {0}")]
    InvalidPadding(f32),
}
