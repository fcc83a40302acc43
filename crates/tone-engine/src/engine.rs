//! The tone-reproduction engine.
//!
//! [`ToneEngine`] owns every derived buffer of the pipeline and runs the
//! per-update control flow:
//!
//! ```text
//! histogram scan -> cumulative build -> LUT derive -> LUT-curve render
//!     -> LUT apply -> (if applied) histogram rescan of the output
//!     -> histogram render
//! ```
//!
//! Each stage is timed through [`StatsTracker`]. The engine is
//! single-threaded and not reentrant: all derivation writes go into
//! buffers it owns exclusively, an update always runs to completion, and
//! a concurrent host must serialize `update()` calls externally.
//!
//! Failed derivations never corrupt state: the previous LUT stays active
//! and the failure is reported in [`UpdateReport::derive_error`].

use crate::render::{self, curve_tint, RenderBuffer};
use crate::stats::{Stage, StatsTracker};
use crate::{EngineConfig, EngineError, EngineResult};
use std::cell::Cell;
use tone_core::{Image, Sample};
use tone_hist::{CumulativeHistogram, Histogram};
use tone_lut::{Lut, LutDeriver, LutKind};

/// The canonical 8-bit single-channel engine.
pub type GrayEngine = ToneEngine<u8, 1>;

/// The canonical 8-bit three-channel engine.
pub type RgbEngine = ToneEngine<u8, 3>;

/// Outcome of one [`ToneEngine::update`] call.
#[derive(Debug)]
pub struct UpdateReport {
    /// Whether the LUT was recomputed (memoized reuse reports `false`).
    pub recomputed_lut: bool,
    /// Whether the LUT was applied (`false` for `Identity`, which copies
    /// the source directly).
    pub applied: bool,
    /// Non-fatal derivation failure, if any; the previous LUT was
    /// retained and used for this update.
    pub derive_error: Option<EngineError>,
}

/// Histogram-based tone-reproduction engine.
///
/// Generic over the sample type `T` (bit depth) and channel count `N`;
/// the canonical configurations are the [`GrayEngine`] and [`RgbEngine`]
/// aliases, with 16-bit variants instantiated as `ToneEngine<u16, N>`.
///
/// # Example
///
/// ```rust
/// use tone_core::Image;
/// use tone_engine::{EngineConfig, GrayEngine, LutKind};
///
/// let img: Image<u8, 1> = Image::from_data(2, 2, vec![10, 10, 200, 200]).unwrap();
/// let mut engine = GrayEngine::new(2, 2, EngineConfig::default());
/// engine.set_lut_kind(LutKind::Negative);
///
/// let report = engine.update(&img).unwrap();
/// assert!(report.applied);
/// assert_eq!(engine.output().data(), &[245, 245, 55, 55]);
/// ```
#[derive(Debug)]
pub struct ToneEngine<T: Sample, const N: usize> {
    config: EngineConfig,
    /// Configured source dimensions; updates must match them.
    width: u32,
    height: u32,
    hist: Histogram<N>,
    cum: CumulativeHistogram<N>,
    deriver: LutDeriver<T, N>,
    output: Image<T, N>,
    hist_view: RenderBuffer,
    lut_view: RenderBuffer,
    stats: StatsTracker,
    /// Histogram accumulation across updates (bins not zeroed).
    accumulate: bool,
    /// Display cumulative curves instead of raw bins.
    show_cumulative: bool,
    /// Per-curve visibility (channels, then luminance).
    show: Vec<bool>,
    /// Out-of-range accessor indices clamped so far.
    index_errors: Cell<u64>,
}

impl<T: Sample, const N: usize> ToneEngine<T, N> {
    /// Creates an engine for `width x height` source images.
    pub fn new(width: u32, height: u32, config: EngineConfig) -> Self {
        let mut engine = Self {
            config,
            width: 0,
            height: 0,
            hist: Histogram::new(T::LEVELS, config.compute_luminance),
            cum: CumulativeHistogram::new(T::LEVELS),
            deriver: LutDeriver::new(),
            output: Image::new(0, 0),
            hist_view: RenderBuffer::new(config.draw_width, config.draw_height),
            lut_view: RenderBuffer::new(config.draw_width, config.draw_height),
            stats: StatsTracker::new(config.time_cumulative),
            accumulate: false,
            show_cumulative: false,
            show: vec![true; N + 1],
            index_errors: Cell::new(0),
        };
        engine.reconfigure(width, height);
        engine
    }

    /// Reallocates every derived buffer for a new source size.
    ///
    /// The only lifecycle entry point a host must call when the source
    /// image's size changes; display flags, the selected kind and the
    /// timing statistics survive, the histogram/LUT state is rebuilt on
    /// the next update.
    pub fn reconfigure(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.hist = Histogram::new(T::LEVELS, self.config.compute_luminance);
        self.cum = CumulativeHistogram::new(T::LEVELS);
        self.output = Image::new(width, height);
        self.hist_view = RenderBuffer::new(self.config.draw_width, self.config.draw_height);
        self.lut_view = RenderBuffer::new(self.config.draw_width, self.config.draw_height);
        tracing::debug!(width, height, channels = N, "engine buffers reconfigured");
    }

    /// Runs one full pipeline pass over `image`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Configuration`] if the image is empty or does not
    /// match the configured size. Non-fatal derivation failures do not
    /// fail the call; they surface in [`UpdateReport::derive_error`]
    /// with the previous LUT retained.
    pub fn update(&mut self, image: &Image<T, N>) -> EngineResult<UpdateReport> {
        if image.dimensions() != (self.width, self.height) {
            return Err(EngineError::Configuration(format!(
                "image size {}x{} does not match configured {}x{}; call reconfigure first",
                image.width(),
                image.height(),
                self.width,
                self.height,
            )));
        }

        let t = self.stats.start();
        let scan = self
            .hist
            .accumulate(image, self.accumulate)
            .and_then(|_| self.cum.compute(&self.hist));
        self.stats.stop(Stage::Histogram, t);
        scan?;

        let t = self.stats.start();
        let derived = self.deriver.derive(&self.cum);
        self.stats.stop(Stage::LutDerive, t);
        let (recomputed_lut, derive_error) = match derived {
            Ok(recomputed) => {
                if recomputed {
                    tracing::debug!(kind = ?self.deriver.kind(), "LUT recomputed");
                }
                (recomputed, None)
            }
            Err(err) => {
                tracing::warn!(error = %err, "LUT derivation failed; previous LUT retained");
                (false, Some(EngineError::from(err)))
            }
        };

        let t = self.stats.start();
        self.render_lut_view();
        self.stats.stop(Stage::LutRender, t);

        let applied = self.deriver.kind() != LutKind::Identity;
        let t = self.stats.start();
        let remap = if applied {
            tone_lut::apply_into(image, self.deriver.lut(), &mut self.output)
        } else {
            self.output = image.clone();
            Ok(())
        };
        self.stats.stop(Stage::LutApply, t);
        remap?;

        if applied {
            let t = self.stats.start();
            let rescan = self
                .hist
                .accumulate(&self.output, self.accumulate)
                .and_then(|_| self.cum.compute(&self.hist));
            self.stats.stop(Stage::Rehistogram, t);
            rescan?;
        }

        let t = self.stats.start();
        self.render_hist_view();
        self.stats.stop(Stage::HistogramRender, t);

        Ok(UpdateReport {
            recomputed_lut,
            applied,
            derive_error,
        })
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    /// One histogram value, raw or cumulative.
    ///
    /// Out-of-range `curve`/`bin` indices are clamped to the nearest
    /// valid index and reported (tracing warn + [`index_errors`]
    /// counter) rather than failing the call.
    ///
    /// [`index_errors`]: Self::index_errors
    pub fn histogram_value(&self, curve: usize, bin: usize, cumulative: bool) -> f64 {
        let curves = self.hist.curve_count();
        let c = if curve >= curves {
            self.report_index_error("curve", curve, curves - 1);
            curves - 1
        } else {
            curve
        };
        let b = if bin >= T::LEVELS {
            self.report_index_error("bin", bin, T::LEVELS - 1);
            T::LEVELS - 1
        } else {
            bin
        };

        let data = if cumulative {
            self.cum.curve(c)
        } else {
            self.hist.curve(c)
        };
        data.map_or(0.0, |d| d[b])
    }

    /// The transformed image of the last update.
    #[inline]
    pub fn output(&self) -> &Image<T, N> {
        &self.output
    }

    /// The histogram-bar visualization buffer.
    #[inline]
    pub fn histogram_view(&self) -> &RenderBuffer {
        &self.hist_view
    }

    /// The LUT-curve visualization buffer.
    #[inline]
    pub fn lut_view(&self) -> &RenderBuffer {
        &self.lut_view
    }

    /// Per-stage timing statistics.
    #[inline]
    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    /// The active LUT.
    #[inline]
    pub fn lut(&self) -> &Lut<T, N> {
        self.deriver.lut()
    }

    /// The selected transfer-function kind.
    #[inline]
    pub fn kind(&self) -> LutKind {
        self.deriver.kind()
    }

    /// The current percentage parameter.
    #[inline]
    pub fn param(&self) -> f64 {
        self.deriver.param()
    }

    /// Configured source dimensions.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The engine configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Out-of-range accessor indices clamped so far.
    #[inline]
    pub fn index_errors(&self) -> u64 {
        self.index_errors.get()
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Selects the transfer-function kind. A change resets the timing
    /// statistics to a zero-sample state.
    pub fn set_lut_kind(&mut self, kind: LutKind) {
        if self.deriver.set_kind(kind) {
            tracing::debug!(?kind, "LUT kind changed; timing statistics reset");
            self.stats.reset();
        }
    }

    /// Sets the percentage parameter, clamped to `[0, 100]`. A change
    /// resets the timing statistics.
    pub fn set_lut_param(&mut self, pct: f64) {
        if self.deriver.set_param(pct) {
            tracing::debug!(pct = self.deriver.param(), "LUT parameter changed; timing statistics reset");
            self.stats.reset();
        }
    }

    /// Sets the output bounds of threshold/dynamic curves.
    pub fn set_output_range(&mut self, min: T, max: T) {
        self.deriver.set_output_range(min, max);
    }

    /// Shows or hides one curve in the histogram view. Out-of-range
    /// indices clamp to the last curve, as in [`histogram_value`].
    ///
    /// [`histogram_value`]: Self::histogram_value
    pub fn set_show_component(&mut self, curve: usize, on: bool) {
        let max = self.show.len() - 1;
        let c = if curve > max {
            self.report_index_error("curve", curve, max);
            max
        } else {
            curve
        };
        self.show[c] = on;
    }

    /// Switches stage-time reporting between accumulated totals and the
    /// most recent sample.
    pub fn set_time_cumulative(&mut self, on: bool) {
        self.stats.set_time_cumulative(on);
    }

    /// Display mode only: render cumulative curves instead of raw bins.
    /// Does not affect accumulation; see [`set_accumulate`](Self::set_accumulate).
    pub fn set_cumulative(&mut self, on: bool) {
        self.show_cumulative = on;
    }

    /// Accumulate histogram bins across updates instead of zeroing them
    /// per update.
    pub fn set_accumulate(&mut self, on: bool) {
        self.accumulate = on;
    }

    /// Resets the timing statistics on demand.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn report_index_error(&self, what: &'static str, index: usize, clamped: usize) {
        self.index_errors.set(self.index_errors.get() + 1);
        tracing::warn!(what, index, clamped, "out-of-range histogram access clamped");
    }

    fn render_lut_view(&mut self) {
        let Self {
            deriver, lut_view, ..
        } = self;
        match deriver.lut() {
            Lut::Mono(curve) => {
                render::render_curves(lut_view, &[(curve.as_slice(), curve_tint::<N>(N))]);
            }
            Lut::Color(curves) => {
                let list: Vec<(&[T], [u8; 3])> = curves
                    .iter()
                    .enumerate()
                    .map(|(c, curve)| (curve.as_slice(), curve_tint::<N>(c)))
                    .collect();
                render::render_curves(lut_view, &list);
            }
        }
    }

    fn render_hist_view(&mut self) {
        let Self {
            hist,
            cum,
            hist_view,
            show,
            show_cumulative,
            ..
        } = self;

        let mut curves: Vec<(&[f64], [u8; 3])> = Vec::new();
        for idx in 0..hist.curve_count() {
            if !show[idx] {
                continue;
            }
            let data = if *show_cumulative {
                cum.curve(idx)
            } else {
                hist.curve(idx)
            };
            if let Some(data) = data {
                curves.push((data, curve_tint::<N>(idx)));
            }
        }
        let max = if *show_cumulative {
            cum.max_total()
        } else {
            hist.max_count()
        };
        render::render_bars(hist_view, &curves, max);
    }
}
