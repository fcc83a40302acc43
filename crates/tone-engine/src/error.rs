//! Error types for the engine layer.
//!
//! The engine folds the lower crates' errors into one caller-visible
//! type. The taxonomy mirrors the failure contract: configuration
//! problems (empty or mismatched image, missing luminance data) are
//! fatal for the offending call but never corrupt engine state;
//! parameter violations are non-fatal and surface through
//! [`UpdateReport::derive_error`](crate::UpdateReport); out-of-range
//! accessor indices are clamped and reported through `tracing` plus the
//! engine's index-error counter, never through a failed call.

use thiserror::Error;
use tone_hist::HistError;
use tone_lut::LutError;

/// Error type for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine cannot run with its current inputs: empty image, image
    /// size not matching the configured buffers, or similar.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A LUT derivation or application failure (parameter out of range,
    /// missing luminance curve, level mismatch).
    #[error(transparent)]
    Lut(#[from] LutError),
}

impl From<HistError> for EngineError {
    fn from(err: HistError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl EngineError {
    /// Returns `true` for errors in the non-fatal derivation class: the
    /// previous LUT is retained and the pipeline keeps running with it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Lut(LutError::ParameterOutOfRange { .. })
                | Self::Lut(LutError::MissingLuminance)
                | Self::Lut(LutError::EmptyHistogram)
        )
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hist_error_becomes_configuration() {
        let err: EngineError = HistError::EmptyImage {
            width: 0,
            height: 4,
        }
        .into();
        assert!(matches!(err, EngineError::Configuration(_)));
        assert!(err.to_string().contains("0x4"));
    }

    #[test]
    fn test_recoverable_classification() {
        let param: EngineError = LutError::ParameterOutOfRange { value: 100.0 }.into();
        assert!(param.is_recoverable());
        let lum: EngineError = LutError::MissingLuminance.into();
        assert!(lum.is_recoverable());
        let cfg = EngineError::Configuration("empty image".into());
        assert!(!cfg.is_recoverable());
    }
}
