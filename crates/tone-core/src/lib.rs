//! # tone-core
//!
//! Core types for histogram-based tone reproduction.
//!
//! This crate provides the foundational types used throughout the tone-rs
//! workspace:
//!
//! - [`Sample`] - trait fixing the pipeline's bit depth (`u8`, `u16`)
//! - [`Image`] - row-major interleaved pixel buffer with copy-on-write storage
//! - [`sample::LUMA`] - the weights used for the synthetic luminance histogram
//!
//! ## Crate Structure
//!
//! This crate is the foundation of tone-rs and has no internal dependencies.
//! All other tone-rs crates depend on `tone-core`:
//!
//! ```text
//! tone-core (this crate)
//!    ^
//!    |
//!    +-- tone-hist (histograms, cumulative distributions)
//!    +-- tone-lut (LUT derivation and application)
//!    +-- tone-engine (pipeline orchestration)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for configuration-adjacent types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod sample;

// Re-exports for convenience
pub use error::{Error, Result};
pub use image::Image;
pub use sample::{luminance, Sample, LUMA, LUMA_B, LUMA_G, LUMA_R};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use tone_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::sample::{luminance, Sample, LUMA, LUMA_B, LUMA_G, LUMA_R};
}
