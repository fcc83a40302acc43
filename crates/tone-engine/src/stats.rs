//! Per-stage execution-time statistics.
//!
//! [`StatsTracker`] wraps the six pipeline stages with elapsed-time
//! measurement and a single-pass Welford accumulator per stage: running
//! mean and standard deviation without storing samples. Statistics reset
//! on demand and automatically whenever the LUT kind or parameter
//! changes.
//!
//! Timing is an observability attachment, not required for correctness;
//! the time source is the [`Clock`] trait so tests can drive the tracker
//! with a deterministic fake instead of `std::time::Instant`.

use std::time::{Duration, Instant};

/// Monotonic time source, readings measured from an arbitrary epoch.
pub trait Clock: Send + Sync {
    /// Current reading of the clock.
    fn now(&self) -> Duration;
}

/// Default [`Clock`] backed by [`std::time::Instant`].
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock with its epoch at the call site.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// The timed stages of one engine update, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Source histogram scan plus the cumulative build.
    Histogram,
    /// LUT derivation (or memoized reuse).
    LutDerive,
    /// LUT-curve visualization render.
    LutRender,
    /// LUT application to the source image.
    LutApply,
    /// Post-apply histogram rescan of the output image.
    Rehistogram,
    /// Histogram visualization render.
    HistogramRender,
}

impl Stage {
    /// Number of stages.
    pub const COUNT: usize = 6;

    /// Every stage, in pipeline order.
    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::Histogram,
        Stage::LutDerive,
        Stage::LutRender,
        Stage::LutApply,
        Stage::Rehistogram,
        Stage::HistogramRender,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Online timing statistics of one stage.
///
/// Mean and variance use Welford's single-pass recurrence over the
/// sample durations in seconds; the reported standard deviation is the
/// population one (`sqrt(M2 / count)`).
#[derive(Debug, Clone, Default)]
pub struct StageStats {
    last: Duration,
    total: Duration,
    count: u64,
    mean: f64,
    m2: f64,
}

impl StageStats {
    /// Folds one elapsed sample into the statistics.
    pub fn record(&mut self, elapsed: Duration) {
        self.last = elapsed;
        self.total += elapsed;
        self.count += 1;

        let x = elapsed.as_secs_f64();
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of samples folded in since the last reset.
    #[inline]
    pub fn samples(&self) -> u64 {
        self.count
    }

    /// The most recent sample.
    #[inline]
    pub fn last(&self) -> Duration {
        self.last
    }

    /// Sum of all samples since the last reset.
    #[inline]
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Running mean, in seconds.
    #[inline]
    pub fn mean_secs(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation, in seconds.
    pub fn std_dev_secs(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.m2 / self.count as f64).sqrt()
        }
    }

    /// Clears every accumulator back to the zero-sample state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Elapsed-time tracking for every pipeline stage.
pub struct StatsTracker {
    clock: Box<dyn Clock>,
    stages: [StageStats; Stage::COUNT],
    time_cumulative: bool,
}

impl StatsTracker {
    /// Creates a tracker backed by a [`MonotonicClock`].
    pub fn new(time_cumulative: bool) -> Self {
        Self::with_clock(Box::new(MonotonicClock::new()), time_cumulative)
    }

    /// Creates a tracker with an explicit time source.
    pub fn with_clock(clock: Box<dyn Clock>, time_cumulative: bool) -> Self {
        Self {
            clock,
            stages: Default::default(),
            time_cumulative,
        }
    }

    /// Whether [`elapsed`](Self::elapsed) reports accumulated totals.
    #[inline]
    pub fn time_cumulative(&self) -> bool {
        self.time_cumulative
    }

    /// Switches between total and most-recent-sample reporting.
    pub fn set_time_cumulative(&mut self, on: bool) {
        self.time_cumulative = on;
    }

    /// A clock reading to pass to [`stop`](Self::stop).
    #[inline]
    pub fn start(&self) -> Duration {
        self.clock.now()
    }

    /// Records the time elapsed since `start` against `stage`.
    pub fn stop(&mut self, stage: Stage, start: Duration) {
        let elapsed = self.clock.now().saturating_sub(start);
        self.stages[stage.index()].record(elapsed);
    }

    /// Times a closure against `stage`.
    pub fn time<R>(&mut self, stage: Stage, f: impl FnOnce() -> R) -> R {
        let start = self.start();
        let result = f();
        self.stop(stage, start);
        result
    }

    /// Statistics of one stage.
    #[inline]
    pub fn stage(&self, stage: Stage) -> &StageStats {
        &self.stages[stage.index()]
    }

    /// The reported elapsed time of one stage: the accumulated total in
    /// cumulative mode, the most recent sample otherwise.
    pub fn elapsed(&self, stage: Stage) -> Duration {
        let s = self.stage(stage);
        if self.time_cumulative {
            s.total()
        } else {
            s.last()
        }
    }

    /// Resets every stage to the zero-sample state.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}

impl std::fmt::Debug for StatsTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsTracker")
            .field("time_cumulative", &self.time_cumulative)
            .field("stages", &self.stages)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    /// Deterministic clock advanced by hand, readings in microseconds.
    #[derive(Default)]
    struct FakeClock {
        micros: Arc<AtomicU64>,
    }

    impl Clock for FakeClock {
        fn now(&self) -> Duration {
            Duration::from_micros(self.micros.load(Ordering::Relaxed))
        }
    }

    fn fake_tracker() -> (StatsTracker, Arc<AtomicU64>) {
        let micros = Arc::new(AtomicU64::new(0));
        let clock = FakeClock {
            micros: micros.clone(),
        };
        (StatsTracker::with_clock(Box::new(clock), false), micros)
    }

    #[test]
    fn test_welford_known_samples() {
        let mut stats = StageStats::default();
        // Samples 2s, 4s, 6s: mean 4, population variance 8/3.
        for secs in [2, 4, 6] {
            stats.record(Duration::from_secs(secs));
        }
        assert_eq!(stats.samples(), 3);
        assert_eq!(stats.last(), Duration::from_secs(6));
        assert_eq!(stats.total(), Duration::from_secs(12));
        assert_relative_eq!(stats.mean_secs(), 4.0);
        assert_relative_eq!(stats.std_dev_secs(), (8.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_single_sample_has_zero_deviation() {
        let mut stats = StageStats::default();
        stats.record(Duration::from_millis(5));
        assert_relative_eq!(stats.std_dev_secs(), 0.0);
        assert_relative_eq!(stats.mean_secs(), 0.005);
    }

    #[test]
    fn test_reset_returns_to_zero_samples() {
        let mut stats = StageStats::default();
        stats.record(Duration::from_secs(1));
        stats.reset();
        assert_eq!(stats.samples(), 0);
        assert_eq!(stats.total(), Duration::ZERO);
        assert_eq!(stats.mean_secs(), 0.0);
    }

    #[test]
    fn test_tracker_start_stop() {
        let (mut tracker, micros) = fake_tracker();
        let t = tracker.start();
        micros.store(250, Ordering::Relaxed);
        tracker.stop(Stage::Histogram, t);

        assert_eq!(
            tracker.stage(Stage::Histogram).last(),
            Duration::from_micros(250)
        );
        assert_eq!(tracker.stage(Stage::LutDerive).samples(), 0);
    }

    #[test]
    fn test_elapsed_cumulative_vs_last() {
        let (mut tracker, micros) = fake_tracker();
        for (start, end) in [(0, 100), (100, 400)] {
            micros.store(start, Ordering::Relaxed);
            let t = tracker.start();
            micros.store(end, Ordering::Relaxed);
            tracker.stop(Stage::LutApply, t);
        }

        assert_eq!(
            tracker.elapsed(Stage::LutApply),
            Duration::from_micros(300)
        );
        tracker.set_time_cumulative(true);
        assert_eq!(
            tracker.elapsed(Stage::LutApply),
            Duration::from_micros(400)
        );
    }

    #[test]
    fn test_time_closure() {
        let (mut tracker, micros) = fake_tracker();
        let out = tracker.time(Stage::LutDerive, || {
            micros.store(42, Ordering::Relaxed);
            7
        });
        assert_eq!(out, 7);
        assert_eq!(
            tracker.stage(Stage::LutDerive).last(),
            Duration::from_micros(42)
        );
    }

    #[test]
    fn test_tracker_reset_all_stages() {
        let (mut tracker, micros) = fake_tracker();
        for stage in Stage::ALL {
            let t = tracker.start();
            micros.fetch_add(10, Ordering::Relaxed);
            tracker.stop(stage, t);
        }
        tracker.reset();
        for stage in Stage::ALL {
            assert_eq!(tracker.stage(stage).samples(), 0, "{stage:?}");
        }
    }
}
