//! LUT derivation state machine.
//!
//! [`LutDeriver`] owns the selected [`LutKind`], the percentage parameter,
//! and the active [`Lut`]. Each call to [`LutDeriver::derive`] either
//! recomputes the LUT from the current cumulative histograms or reuses
//! the previous buffer:
//!
//! - `Identity`, `Gamma`, `Negative` depend only on the (kind, parameter)
//!   pair and are memoized: they recompute on transition into the kind
//!   (or, for `Gamma`, on a parameter change) and report no recompute
//!   otherwise.
//! - Every other kind is a function of the histogram and recomputes on
//!   every update.
//!
//! Validation (parameter range, luminance presence, population presence)
//! happens before any buffer write, so a failed derivation leaves the
//! last known-good LUT bitwise intact.
//!
//! # Curve formulas
//!
//! With `levels` bins, output bounds `[out_min, out_max]`, parameter `p`:
//!
//! - Identity: `LUT[i] = i`
//! - Negative: `LUT[i] = (levels-1) - i`
//! - Gamma: `g = 0.4101*exp(2.3186*p/100) - 0.2506`,
//!   `LUT[i] = clamp(round((i/(levels-1))^g * (levels-1)), 0, levels-1)`
//! - Threshold: `t` = first bin whose cumulative value strictly exceeds
//!   `c_max*p/100` (default `levels/2`); `out_min` below `t`, `out_max`
//!   from `t` on
//! - Dynamic stretch: the central `p`% of the population maps linearly
//!   onto the full output range (see [`DynamicGray`](LutKind::DynamicGray))
//! - Equalize: `LUT[i] = clamp(round(cum[i]*(levels-1)/total), 0, levels-1)`
//!
//! Gray kinds read the luminance cumulative curve (for single-channel
//! pipelines the sole channel is its own luminance); color kinds read
//! each channel's own curve and produce a per-channel LUT.

use crate::{Lut, LutError, LutKind, LutResult};
use tone_core::Sample;
use tone_hist::CumulativeHistogram;

/// Gamma exponent model: `g = SCALE * exp(RATE * p/100) - OFFSET`.
const GAMMA_SCALE: f64 = 0.4101;
const GAMMA_RATE: f64 = 2.3186;
const GAMMA_OFFSET: f64 = 0.2506;

/// Default percentage parameter.
const DEFAULT_PARAM: f64 = 50.0;

/// State machine deriving the active LUT from cumulative histograms.
///
/// # Example
///
/// ```rust
/// use tone_core::Image;
/// use tone_hist::{CumulativeHistogram, Histogram};
/// use tone_lut::{LutDeriver, LutKind};
///
/// let img: Image<u8, 1> = Image::from_data(2, 2, vec![10, 10, 200, 200]).unwrap();
/// let mut hist = Histogram::<1>::new(256, false);
/// hist.accumulate(&img, false).unwrap();
/// let mut cum = CumulativeHistogram::<1>::new(256);
/// cum.compute(&hist).unwrap();
///
/// let mut deriver: LutDeriver<u8, 1> = LutDeriver::new();
/// deriver.set_kind(LutKind::Negative);
/// assert!(deriver.derive(&cum).unwrap());  // recomputed on transition
/// assert!(!deriver.derive(&cum).unwrap()); // memoized afterwards
/// assert_eq!(deriver.lut().lookup(0, 10), 245);
/// ```
#[derive(Debug, Clone)]
pub struct LutDeriver<T: Sample, const N: usize> {
    /// Selected transfer-function kind
    kind: LutKind,
    /// Percentage parameter, kept in [0, 100]
    param: f64,
    /// (kind, parameter) the active LUT was derived with
    derived: Option<(LutKind, f64)>,
    /// Lower output bound for threshold/dynamic curves
    out_min: T,
    /// Upper output bound for threshold/dynamic curves
    out_max: T,
    /// The active LUT
    lut: Lut<T, N>,
}

impl<T: Sample, const N: usize> LutDeriver<T, N> {
    /// Creates a deriver holding the identity LUT.
    pub fn new() -> Self {
        Self {
            kind: LutKind::Identity,
            param: DEFAULT_PARAM,
            derived: Some((LutKind::Identity, DEFAULT_PARAM)),
            out_min: T::ZERO,
            out_max: T::MAX,
            lut: Lut::identity(),
        }
    }

    /// The selected kind.
    #[inline]
    pub fn kind(&self) -> LutKind {
        self.kind
    }

    /// The current percentage parameter.
    #[inline]
    pub fn param(&self) -> f64 {
        self.param
    }

    /// The active LUT (last successfully derived).
    #[inline]
    pub fn lut(&self) -> &Lut<T, N> {
        &self.lut
    }

    /// Selects a new kind. Returns `true` if it differs from the current
    /// one (callers reset their timing statistics on that signal).
    pub fn set_kind(&mut self, kind: LutKind) -> bool {
        let changed = kind != self.kind;
        self.kind = kind;
        changed
    }

    /// Sets the percentage parameter, clamped to `[0, 100]`. Returns
    /// `true` if the stored value changed. NaN is ignored.
    pub fn set_param(&mut self, pct: f64) -> bool {
        if pct.is_nan() {
            return false;
        }
        let clamped = pct.clamp(0.0, 100.0);
        let changed = clamped != self.param;
        self.param = clamped;
        changed
    }

    /// Sets the output bounds used by threshold and dynamic curves.
    /// Reversed bounds are swapped. Invalidates the memoized LUT.
    pub fn set_output_range(&mut self, min: T, max: T) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.out_min = min;
        self.out_max = max;
        self.derived = None;
    }

    /// Derives the LUT for the current (kind, parameter) from `cum`.
    ///
    /// Returns `Ok(true)` when the LUT was recomputed and `Ok(false)`
    /// when the memoized buffer of a histogram-independent kind was
    /// reused.
    ///
    /// # Errors
    ///
    /// - [`LutError::ParameterOutOfRange`] - threshold/dynamic kind with
    ///   the parameter not strictly inside `(0, 100)`
    /// - [`LutError::MissingLuminance`] - gray kind on a 3-channel
    ///   pipeline whose histogram skipped the luminance curve
    /// - [`LutError::EmptyHistogram`] - histogram-dependent kind over a
    ///   zero-sample population
    ///
    /// On error the previous LUT is retained unmodified.
    pub fn derive(&mut self, cum: &CumulativeHistogram<N>) -> LutResult<bool> {
        if !self.kind.histogram_dependent() {
            if let Some((kind, param)) = self.derived {
                if kind == self.kind && (!self.kind.uses_parameter() || param == self.param) {
                    return Ok(false);
                }
            }
        }

        if self.kind.requires_open_interval() && !(self.param > 0.0 && self.param < 100.0) {
            return Err(LutError::ParameterOutOfRange { value: self.param });
        }
        if self.kind.histogram_dependent() && cum.max_total() <= 0.0 {
            return Err(LutError::EmptyHistogram);
        }

        let param = self.param;
        let (out_min, out_max) = (self.out_min, self.out_max);
        self.lut = match self.kind {
            LutKind::Identity => Lut::identity(),
            LutKind::Negative => Lut::Mono(negative_curve::<T>()),
            LutKind::Gamma => Lut::Mono(gamma_curve::<T>(param)),
            LutKind::ThresholdGray => {
                Lut::Mono(threshold_curve(luma_curve(cum)?, param, out_min, out_max))
            }
            LutKind::DynamicGray => {
                Lut::Mono(dynamic_curve(luma_curve(cum)?, param, out_min, out_max))
            }
            LutKind::EqualizeGray => Lut::Mono(equalize_curve(luma_curve(cum)?)),
            LutKind::ThresholdColor => Lut::Color(std::array::from_fn(|c| {
                threshold_curve(channel_curve(cum, c), param, out_min, out_max)
            })),
            LutKind::DynamicColor => Lut::Color(std::array::from_fn(|c| {
                dynamic_curve(channel_curve(cum, c), param, out_min, out_max)
            })),
            LutKind::EqualizeColor => {
                Lut::Color(std::array::from_fn(|c| equalize_curve(channel_curve(cum, c))))
            }
        };

        self.derived = Some((self.kind, self.param));
        Ok(true)
    }
}

impl<T: Sample, const N: usize> Default for LutDeriver<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// The luminance population: the synthetic curve for 3-channel
/// pipelines, the sole channel for single-channel ones.
fn luma_curve<const N: usize>(cum: &CumulativeHistogram<N>) -> LutResult<&[f64]> {
    if N == 1 {
        Ok(cum.curve(0).expect("channel 0 always present"))
    } else {
        cum.luma().ok_or(LutError::MissingLuminance)
    }
}

fn channel_curve<const N: usize>(cum: &CumulativeHistogram<N>, c: usize) -> &[f64] {
    cum.curve(c).expect("channel curve always present")
}

// ============================================================================
// Curve builders
// ============================================================================

fn negative_curve<T: Sample>() -> Vec<T> {
    (0..T::LEVELS)
        .map(|i| T::from_level(T::LEVELS - 1 - i))
        .collect()
}

fn gamma_curve<T: Sample>(p: f64) -> Vec<T> {
    let gamma = GAMMA_SCALE * (GAMMA_RATE * p / 100.0).exp() - GAMMA_OFFSET;
    let max = (T::LEVELS - 1) as f64;
    (0..T::LEVELS)
        .map(|i| {
            let v = ((i as f64 / max).powf(gamma) * max).round().clamp(0.0, max);
            T::from_level(v as usize)
        })
        .collect()
}

/// Binary split at the percentile where the cumulative population
/// strictly exceeds `c_max * p/100`; `levels/2` when no bin qualifies.
fn threshold_curve<T: Sample>(cum: &[f64], p: f64, out_min: T, out_max: T) -> Vec<T> {
    let levels = cum.len();
    let level = cum[levels - 1] * p / 100.0;

    let mut t = levels / 2;
    for (i, &v) in cum.iter().enumerate() {
        if v > level {
            t = i;
            break;
        }
    }

    (0..levels)
        .map(|i| if i < t { out_min } else { out_max })
        .collect()
}

/// Linear stretch of the central `p`% of the population onto
/// `[out_min, out_max]`.
///
/// `min_idx`/`max_idx` bound the retained population (`(100-p)/200` of
/// the total clipped at each end); the window maps with slope
/// `(out_max - out_min) / (max_idx - 1 - min_idx)`. A degenerate window
/// collapses to a step at `min_idx`.
fn dynamic_curve<T: Sample>(cum: &[f64], p: f64, out_min: T, out_max: T) -> Vec<T> {
    let levels = cum.len();
    let count = cum[levels - 1];
    let threshold = (100.0 - p) / 200.0;
    let min_thres = count * threshold;
    let max_thres = count - min_thres;

    let mut min_idx = 0usize;
    for (i, &v) in cum.iter().enumerate() {
        if v > min_thres {
            min_idx = i;
            break;
        }
    }
    let mut max_idx = levels;
    for (i, &v) in cum.iter().enumerate() {
        if v > max_thres {
            max_idx = i;
            break;
        }
    }

    if max_idx <= min_idx + 1 {
        return (0..levels)
            .map(|i| if i < min_idx { out_min } else { out_max })
            .collect();
    }

    let lo = out_min.to_level() as f64;
    let hi = out_max.to_level() as f64;
    let slope = (hi - lo) / (max_idx - 1 - min_idx) as f64;

    (0..levels)
        .map(|i| {
            if i < min_idx {
                out_min
            } else if i >= max_idx {
                out_max
            } else {
                let v = ((i - min_idx) as f64 * slope).round().clamp(lo, hi);
                T::from_level(v as usize)
            }
        })
        .collect()
}

/// Classic equalization: the cumulative distribution rescaled to the
/// level range.
fn equalize_curve<T: Sample>(cum: &[f64]) -> Vec<T> {
    let levels = cum.len();
    let total = cum[levels - 1];
    let max = (levels - 1) as f64;
    let scale = max / total;
    cum.iter()
        .map(|&v| T::from_level((v * scale).round().clamp(0.0, max) as usize))
        .collect()
}
