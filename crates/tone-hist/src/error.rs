//! Error types for histogram operations.

use thiserror::Error;

/// Error type for histogram accumulation and cumulative builds.
#[derive(Debug, Error)]
pub enum HistError {
    /// The source image has zero area.
    #[error("cannot build histogram from empty image ({width}x{height})")]
    EmptyImage {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// The image's bit depth does not match the histogram's bin count.
    #[error("level count mismatch: histogram has {expected} bins, image samples span {got}")]
    LevelMismatch {
        /// Bins allocated in the histogram
        expected: usize,
        /// Levels of the image's sample type
        got: usize,
    },
}

/// Result type for histogram operations.
pub type HistResult<T> = Result<T, HistError>;
