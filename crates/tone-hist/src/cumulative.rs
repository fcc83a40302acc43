//! Cumulative distributions (prefix-summed histograms).
//!
//! [`CumulativeHistogram`] holds, per curve, the running prefix sum of a
//! [`Histogram`]: `cum[0] = hist[0]`, `cum[i] = cum[i-1] + hist[i]`. The
//! result is monotonically non-decreasing and its final bin equals the
//! total sample count of that curve (or a multiple of it when the source
//! histogram is accumulating across updates).
//!
//! The builder is invoked after every histogram recompute; percentile
//! searches in LUT derivation and the cumulative display mode both read
//! from it.

use crate::{HistError, HistResult, Histogram};

/// Per-curve prefix sums of a [`Histogram`], plus the maximum final value.
///
/// Curve indexing matches [`Histogram`]: `0..N` are channels, `N` is the
/// luminance curve when present.
///
/// # Example
///
/// ```rust
/// use tone_core::Image;
/// use tone_hist::{CumulativeHistogram, Histogram};
///
/// let img: Image<u8, 1> = Image::from_data(2, 2, vec![10, 10, 200, 200]).unwrap();
/// let mut hist = Histogram::<1>::new(256, false);
/// hist.accumulate(&img, false).unwrap();
///
/// let mut cum = CumulativeHistogram::<1>::new(256);
/// cum.compute(&hist).unwrap();
///
/// let curve = cum.curve(0).unwrap();
/// assert_eq!(curve[9], 0.0);
/// assert_eq!(curve[10], 2.0);
/// assert_eq!(curve[199], 2.0);
/// assert_eq!(curve[200], 4.0);
/// assert_eq!(cum.total(0), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct CumulativeHistogram<const N: usize> {
    /// Bin count per curve
    levels: usize,
    /// One prefix-sum array per image channel
    curves: [Vec<f64>; N],
    /// Prefix sums of the synthetic luminance curve
    luma: Option<Vec<f64>>,
    /// Largest final cumulative value across curves
    max_total: f64,
}

impl<const N: usize> CumulativeHistogram<N> {
    /// Creates a zeroed cumulative histogram with `levels` bins per curve.
    ///
    /// The luminance curve is allocated lazily on the first
    /// [`compute`](Self::compute) from a histogram that carries one.
    pub fn new(levels: usize) -> Self {
        Self {
            levels,
            curves: std::array::from_fn(|_| vec![0.0; levels]),
            luma: None,
            max_total: 0.0,
        }
    }

    /// Number of bins per curve.
    #[inline]
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Number of curves, including luminance when present.
    #[inline]
    pub fn curve_count(&self) -> usize {
        N + self.luma.is_some() as usize
    }

    /// Returns `true` if a luminance curve has been computed.
    #[inline]
    pub fn has_luma(&self) -> bool {
        self.luma.is_some()
    }

    /// Largest final cumulative value across all curves.
    #[inline]
    pub fn max_total(&self) -> f64 {
        self.max_total
    }

    /// Prefix-sum array of one curve: `0..N` are channels, `N` is luminance.
    pub fn curve(&self, index: usize) -> Option<&[f64]> {
        if index < N {
            Some(&self.curves[index])
        } else if index == N {
            self.luma.as_deref()
        } else {
            None
        }
    }

    /// Prefix sums of the luminance curve, when present.
    #[inline]
    pub fn luma(&self) -> Option<&[f64]> {
        self.luma.as_deref()
    }

    /// Final cumulative value (total sample count) of one curve.
    ///
    /// Returns `0.0` for a curve index with no data.
    pub fn total(&self, index: usize) -> f64 {
        self.curve(index)
            .and_then(|c| c.last().copied())
            .unwrap_or(0.0)
    }

    /// Rebuilds every prefix sum from `hist` and tracks the maximum of
    /// the final cumulative values across curves.
    ///
    /// # Errors
    ///
    /// [`HistError::LevelMismatch`] if the histogram's bin count differs.
    pub fn compute(&mut self, hist: &Histogram<N>) -> HistResult<()> {
        if hist.levels() != self.levels {
            return Err(HistError::LevelMismatch {
                expected: self.levels,
                got: hist.levels(),
            });
        }

        let mut max_total = 0.0f64;
        for (c, curve) in self.curves.iter_mut().enumerate() {
            let bins = hist.curve(c).expect("channel curve always present");
            prefix_sum(bins, curve);
            max_total = max_total.max(curve[self.levels - 1]);
        }

        match hist.luma() {
            Some(bins) => {
                let curve = self.luma.get_or_insert_with(|| vec![0.0; hist.levels()]);
                prefix_sum(bins, curve);
                max_total = max_total.max(curve[self.levels - 1]);
            }
            None => self.luma = None,
        }

        self.max_total = max_total;
        Ok(())
    }
}

/// `out[0] = bins[0]`, `out[i] = out[i-1] + bins[i]`.
fn prefix_sum(bins: &[f64], out: &mut [f64]) {
    let mut running = 0.0;
    for (dst, &v) in out.iter_mut().zip(bins) {
        running += v;
        *dst = running;
    }
}
