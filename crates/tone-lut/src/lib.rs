//! # tone-lut
//!
//! Look-up-table transfer functions for the tone-reproduction pipeline:
//! the LUT container, the kind state machine deriving tone curves from
//! cumulative histograms, and the per-pixel remap.
//!
//! # Types
//!
//! - [`Lut`] - tagged `{Mono, Color}` remap table, one entry per level
//! - [`LutKind`] - the nine transfer-function kinds
//! - [`LutDeriver`] - memoizing state machine computing the active LUT
//! - [`apply_into`] / [`apply`] - image remap through a derived LUT
//!
//! # Usage
//!
//! ```rust
//! use tone_core::Image;
//! use tone_hist::{CumulativeHistogram, Histogram};
//! use tone_lut::{apply, LutDeriver, LutKind};
//!
//! let img: Image<u8, 1> = Image::from_data(2, 2, vec![10, 10, 200, 200]).unwrap();
//! let mut hist = Histogram::<1>::new(256, false);
//! hist.accumulate(&img, false).unwrap();
//! let mut cum = CumulativeHistogram::<1>::new(256);
//! cum.compute(&hist).unwrap();
//!
//! let mut deriver: LutDeriver<u8, 1> = LutDeriver::new();
//! deriver.set_kind(LutKind::EqualizeGray);
//! deriver.derive(&cum).unwrap();
//! let enhanced = apply(&img, deriver.lut()).unwrap();
//! # assert_eq!(enhanced.dimensions(), img.dimensions());
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - rayon-parallel remap loop (identical results)
//! - `serde` - serialization for [`LutKind`]
//!
//! # Dependencies
//!
//! - [`tone-core`] - image buffer and sample formats
//! - [`tone-hist`] - cumulative histograms feeding the deriver
//! - [`thiserror`] - error handling
//!
//! # Used By
//!
//! - `tone-engine` - derive and apply stages of the update pipeline

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod apply;
mod derive;
mod error;
mod kind;
mod lut;

pub use apply::{apply, apply_into};
pub use derive::LutDeriver;
pub use error::{LutError, LutResult};
pub use kind::LutKind;
pub use lut::Lut;
