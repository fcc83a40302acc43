//! Error types for LUT derivation and application.

use thiserror::Error;

/// Error type for LUT operations.
///
/// Derivation errors are non-fatal by contract: the deriver validates its
/// inputs before touching any buffer, so on error the previous LUT is
/// still intact and the caller may keep using it.
#[derive(Debug, Error)]
pub enum LutError {
    /// Percentage parameter outside the open interval required by
    /// threshold and dynamic-stretch kinds.
    #[error("parameter {value} outside open interval (0, 100)")]
    ParameterOutOfRange {
        /// The offending percentage
        value: f64,
    },

    /// A grayscale kind needs the luminance cumulative curve, but the
    /// histogram was built without one.
    #[error("luminance cumulative histogram required but not computed")]
    MissingLuminance,

    /// The cumulative histogram holds no samples; no population to
    /// derive percentiles or an equalization curve from.
    #[error("cumulative histogram is empty (total sample count is zero)")]
    EmptyHistogram,

    /// The LUT's entry count does not match the image's level count.
    #[error("LUT has {lut} entries but image samples span {image} levels")]
    LevelMismatch {
        /// Entries in the LUT
        lut: usize,
        /// Levels of the image's sample type
        image: usize,
    },

    /// Source and destination images disagree in size.
    #[error("image size mismatch: {src_width}x{src_height} vs {dst_width}x{dst_height}")]
    SizeMismatch {
        /// Source width
        src_width: u32,
        /// Source height
        src_height: u32,
        /// Destination width
        dst_width: u32,
        /// Destination height
        dst_height: u32,
    },
}

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;
