use thiserror::Error;

/// Errors raised by the game core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A snake segment was requested past the end of the body
    #[error("segment index {index} out of range for snake of length {len}")]
    SegmentOutOfRange { index: usize, len: usize },

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}
