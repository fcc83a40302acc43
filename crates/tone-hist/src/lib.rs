//! # tone-hist
//!
//! Per-channel intensity histograms and cumulative distributions for the
//! tone-reproduction pipeline.
//!
//! # Types
//!
//! - [`Histogram`] - per-channel frequency counts with an optional
//!   synthetic luminance curve (weighted sum of the channel marginals)
//! - [`CumulativeHistogram`] - prefix sums of a histogram, used for
//!   percentile searches and cumulative display
//!
//! # Invariants
//!
//! - With accumulation off, every channel's bins sum to the pixel count.
//! - Cumulative curves are monotonically non-decreasing; the final bin
//!   equals the total sample count (a multiple of it under accumulation).
//!
//! # Dependencies
//!
//! - [`tone-core`] - image buffer and sample formats
//! - [`thiserror`] - error handling
//!
//! # Used By
//!
//! - `tone-lut` - percentile-based LUT derivation
//! - `tone-engine` - the histogram stages of the update pipeline

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cumulative;
mod error;
mod histogram;

pub use cumulative::CumulativeHistogram;
pub use error::{HistError, HistResult};
pub use histogram::Histogram;
