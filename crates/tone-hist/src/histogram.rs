//! Per-channel frequency histograms.
//!
//! [`Histogram`] scans an image and counts pixel occurrences per intensity
//! level, one ordered bin array per channel. For 3-channel images it can
//! additionally maintain a *synthetic luminance* curve: the weighted sum
//! `0.30*R + 0.59*G + 0.11*B` of the three marginal histograms. This is an
//! approximation of a grayscale histogram computed from the marginals, not
//! the histogram of a converted grayscale image.
//!
//! Bins are `f64` for every curve so the weighted luminance curve shares
//! the same storage and accessor path as the integer-count channels;
//! counts stay exact in `f64` far beyond realistic image sizes.
//!
//! # Accumulation mode
//!
//! [`Histogram::accumulate`] zeroes all bins before scanning unless the
//! caller asks for accumulation, in which case counts pile up across
//! updates and the final cumulative value becomes a multiple of the pixel
//! count.
//!
//! # Used By
//!
//! - [`crate::cumulative::CumulativeHistogram`] - prefix sums
//! - `tone-engine` - histogram stage of the update pipeline

use crate::{HistError, HistResult};
use tone_core::{Image, Sample, LUMA};

/// Per-channel frequency histogram with an optional synthetic luminance curve.
///
/// Curve indexing follows the engine convention: indices `0..N` are the
/// image channels in order, index `N` is the luminance curve when enabled.
///
/// # Example
///
/// ```rust
/// use tone_core::Image;
/// use tone_hist::Histogram;
///
/// let img: Image<u8, 1> = Image::from_data(2, 2, vec![10, 10, 200, 200]).unwrap();
/// let mut hist = Histogram::<1>::new(256, false);
/// hist.accumulate(&img, false).unwrap();
///
/// let bins = hist.curve(0).unwrap();
/// assert_eq!(bins[10], 2.0);
/// assert_eq!(bins[200], 2.0);
/// assert_eq!(bins.iter().sum::<f64>(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct Histogram<const N: usize> {
    /// Bin count per curve (= sample levels)
    levels: usize,
    /// One bin array per image channel
    bins: [Vec<f64>; N],
    /// Synthetic luminance curve (3-channel only)
    luma: Option<Vec<f64>>,
    /// Largest bin value across all curves
    max_count: f64,
}

impl<const N: usize> Histogram<N> {
    /// Creates a zeroed histogram with `levels` bins per curve.
    ///
    /// `with_luma` requests the synthetic luminance curve; it is honored
    /// only for `N == 3` (a single-channel image is its own luminance).
    pub fn new(levels: usize, with_luma: bool) -> Self {
        Self {
            levels,
            bins: std::array::from_fn(|_| vec![0.0; levels]),
            luma: (with_luma && N == 3).then(|| vec![0.0; levels]),
            max_count: 0.0,
        }
    }

    /// Number of bins per curve.
    #[inline]
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Number of curves, including the luminance curve when enabled.
    #[inline]
    pub fn curve_count(&self) -> usize {
        N + self.luma.is_some() as usize
    }

    /// Returns `true` if the synthetic luminance curve is maintained.
    #[inline]
    pub fn has_luma(&self) -> bool {
        self.luma.is_some()
    }

    /// Largest bin value seen across all curves.
    #[inline]
    pub fn max_count(&self) -> f64 {
        self.max_count
    }

    /// Bin array of one curve: `0..N` are channels, `N` is luminance.
    pub fn curve(&self, index: usize) -> Option<&[f64]> {
        if index < N {
            Some(&self.bins[index])
        } else if index == N {
            self.luma.as_deref()
        } else {
            None
        }
    }

    /// The synthetic luminance curve, when enabled.
    #[inline]
    pub fn luma(&self) -> Option<&[f64]> {
        self.luma.as_deref()
    }

    /// Zeroes every bin and the running maximum.
    pub fn reset(&mut self) {
        for bins in &mut self.bins {
            bins.fill(0.0);
        }
        if let Some(luma) = &mut self.luma {
            luma.fill(0.0);
        }
        self.max_count = 0.0;
    }

    /// Scans `image` and counts pixel occurrences per intensity level.
    ///
    /// Unless `accumulating`, all bins are zeroed first; with accumulation
    /// the new counts pile on top of the existing ones. After the scan the
    /// luminance curve (if enabled) is rebuilt as the weighted sum of the
    /// channel histograms and folded into the running maximum.
    ///
    /// # Errors
    ///
    /// - [`HistError::EmptyImage`] if the image has zero area
    /// - [`HistError::LevelMismatch`] if the sample type's level count
    ///   differs from this histogram's bin count
    pub fn accumulate<T: Sample>(
        &mut self,
        image: &Image<T, N>,
        accumulating: bool,
    ) -> HistResult<()> {
        if image.is_empty() {
            return Err(HistError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }
        if T::LEVELS != self.levels {
            return Err(HistError::LevelMismatch {
                expected: self.levels,
                got: T::LEVELS,
            });
        }

        if !accumulating {
            self.reset();
        }

        // Main scan. Interleaved layout: walk pixels, one increment per
        // channel, keeping the running maximum as bins only ever grow.
        let mut max = self.max_count;
        for px in image.data().chunks_exact(N) {
            for (c, sample) in px.iter().enumerate() {
                let bin = &mut self.bins[c][sample.to_level()];
                *bin += 1.0;
                if *bin > max {
                    max = *bin;
                }
            }
        }

        // Luminance is a weighted combination of the marginals, rebuilt
        // from scratch so accumulation mode stays consistent with them.
        if let Some(luma) = &mut self.luma {
            for i in 0..self.levels {
                let v = self.bins[0][i] * LUMA[0]
                    + self.bins[1][i] * LUMA[1]
                    + self.bins[2][i] * LUMA[2];
                luma[i] = v;
                if v > max {
                    max = v;
                }
            }
        }

        self.max_count = max;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gray_2x2() -> Image<u8, 1> {
        Image::from_data(2, 2, vec![10, 10, 200, 200]).unwrap()
    }

    #[test]
    fn test_counts_and_sum() {
        let mut hist = Histogram::<1>::new(256, false);
        hist.accumulate(&gray_2x2(), false).unwrap();

        let bins = hist.curve(0).unwrap();
        assert_eq!(bins[10], 2.0);
        assert_eq!(bins[200], 2.0);
        for (i, &v) in bins.iter().enumerate() {
            if i != 10 && i != 200 {
                assert_eq!(v, 0.0, "bin {i} expected empty");
            }
        }
        assert_eq!(bins.iter().sum::<f64>(), 4.0);
        assert_eq!(hist.max_count(), 2.0);
    }

    #[test]
    fn test_sum_equals_pixel_count_rgb() {
        let img: Image<u8, 3> =
            Image::from_data(2, 2, vec![1, 2, 3, 1, 2, 3, 200, 100, 50, 0, 0, 255]).unwrap();
        let mut hist = Histogram::<3>::new(256, false);
        hist.accumulate(&img, false).unwrap();

        for c in 0..3 {
            let sum: f64 = hist.curve(c).unwrap().iter().sum();
            assert_eq!(sum, img.pixel_count() as f64, "channel {c}");
        }
    }

    #[test]
    fn test_accumulation_mode() {
        let img = gray_2x2();
        let mut hist = Histogram::<1>::new(256, false);
        hist.accumulate(&img, false).unwrap();
        hist.accumulate(&img, true).unwrap();

        let bins = hist.curve(0).unwrap();
        assert_eq!(bins[10], 4.0);
        assert_eq!(bins.iter().sum::<f64>(), 8.0);
        assert_eq!(hist.max_count(), 4.0);

        // A non-accumulating pass resets back to a single scan.
        hist.accumulate(&img, false).unwrap();
        assert_eq!(hist.curve(0).unwrap()[10], 2.0);
        assert_eq!(hist.max_count(), 2.0);
    }

    #[test]
    fn test_luminance_weighted_sum() {
        let img: Image<u8, 3> = Image::filled(4, 1, [10, 20, 30]);
        let mut hist = Histogram::<3>::new(256, true);
        hist.accumulate(&img, false).unwrap();

        let luma = hist.luma().unwrap();
        assert_relative_eq!(luma[10], 4.0 * 0.30);
        assert_relative_eq!(luma[20], 4.0 * 0.59);
        assert_relative_eq!(luma[30], 4.0 * 0.11);
        // Weighted population still sums to the pixel count.
        assert_relative_eq!(luma.iter().sum::<f64>(), 4.0, epsilon = 1e-9);
        assert_eq!(hist.curve_count(), 4);
    }

    #[test]
    fn test_luma_ignored_for_gray() {
        let hist = Histogram::<1>::new(256, true);
        assert!(!hist.has_luma());
        assert_eq!(hist.curve_count(), 1);
    }

    #[test]
    fn test_empty_image_rejected() {
        let img: Image<u8, 1> = Image::new(0, 4);
        let mut hist = Histogram::<1>::new(256, false);
        assert!(matches!(
            hist.accumulate(&img, false),
            Err(HistError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_level_mismatch_rejected() {
        let img: Image<u16, 1> = Image::filled(2, 2, [1000]);
        let mut hist = Histogram::<1>::new(256, false);
        assert!(matches!(
            hist.accumulate(&img, false),
            Err(HistError::LevelMismatch { .. })
        ));
    }

    #[test]
    fn test_curve_out_of_range() {
        let hist = Histogram::<3>::new(256, false);
        assert!(hist.curve(2).is_some());
        assert!(hist.curve(3).is_none()); // no luma curve allocated
    }
}
