//! # tone-engine
//!
//! Orchestration of the histogram-based tone-reproduction pipeline.
//!
//! The [`ToneEngine`] runs, per update: histogram scan, cumulative
//! build, LUT derivation, LUT-curve render, LUT application, a
//! conditional histogram rescan of the output, and the histogram render
//! — every stage wrapped in elapsed-time statistics.
//!
//! # Types
//!
//! - [`ToneEngine`] (with [`GrayEngine`] / [`RgbEngine`] aliases) - the
//!   pipeline
//! - [`EngineConfig`] - construction-time configuration
//! - [`UpdateReport`] - per-update outcome (recompute, apply, errors)
//! - [`stats::StatsTracker`] - per-stage Welford timing statistics
//! - [`render::RenderBuffer`] - histogram / LUT-curve visualization
//!
//! # Usage
//!
//! ```rust
//! use tone_core::Image;
//! use tone_engine::{EngineConfig, LutKind, RgbEngine};
//!
//! let img: Image<u8, 3> = Image::filled(64, 48, [32, 96, 200]);
//! let mut engine = RgbEngine::new(64, 48, EngineConfig::default());
//! engine.set_lut_kind(LutKind::EqualizeColor);
//!
//! let report = engine.update(&img).unwrap();
//! assert!(report.applied);
//! let _enhanced = engine.output();
//! let _histogram_bars = engine.histogram_view();
//! ```
//!
//! # Concurrency contract
//!
//! The engine is single-threaded and not reentrant. It exposes no
//! locking; a concurrent host owns serialization of `update()` calls
//! (single-writer discipline or an external mutex).
//!
//! # Feature Flags
//!
//! - `parallel` - rayon-parallel LUT application (identical results)
//! - `serde` - serialization for configuration types
//!
//! # Dependencies
//!
//! - [`tone-core`] / [`tone-hist`] / [`tone-lut`] - the pipeline stages
//! - [`thiserror`] - error handling
//! - [`tracing`] - recompute/clamp diagnostics (no subscriber installed)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod engine;
mod error;
pub mod render;
pub mod stats;

pub use config::EngineConfig;
pub use engine::{GrayEngine, RgbEngine, ToneEngine, UpdateReport};
pub use error::{EngineError, EngineResult};

// Re-exported so hosts configuring the engine need only this crate.
pub use tone_lut::LutKind;
