//! Engine configuration.

/// Static configuration of a [`ToneEngine`](crate::ToneEngine).
///
/// These knobs are fixed at construction; everything that changes per
/// update (kind, parameter, display flags) goes through the engine's
/// mutators instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Maintain the synthetic luminance histogram for 3-channel images.
    /// Required by the gray threshold/dynamic/equalize kinds.
    pub compute_luminance: bool,
    /// Width of the histogram and LUT visualization buffers, in pixels.
    pub draw_width: u32,
    /// Height of the visualization buffers, in pixels.
    pub draw_height: u32,
    /// Report accumulated per-stage totals instead of the most recent
    /// sample (see [`StatsTracker::elapsed`](crate::stats::StatsTracker::elapsed)).
    pub time_cumulative: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            compute_luminance: true,
            draw_width: 256,
            draw_height: 128,
            time_cumulative: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let cfg = EngineConfig::default();
        assert!(cfg.compute_luminance);
        assert_eq!(cfg.draw_width, 256);
        assert_eq!(cfg.draw_height, 128);
        assert!(!cfg.time_cumulative);
    }
}
