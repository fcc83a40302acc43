//! Transfer-function kinds.
//!
//! [`LutKind`] enumerates every tone curve the deriver can produce. The
//! predicates on it drive the state machine: which kinds depend on the
//! histogram (and therefore recompute every update), which consume the
//! percentage parameter, which require the luminance population, and
//! which produce a per-channel (color) LUT instead of a shared mono one.

/// The transfer-function kinds of the tone pipeline.
///
/// Gray kinds derive one shared curve from the luminance population and
/// apply it identically to every channel; color kinds derive one curve
/// per channel from that channel's own cumulative histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LutKind {
    /// Pass-through: `LUT[i] = i`.
    #[default]
    Identity,
    /// Binary split of the luminance population at the `p`-th percentile.
    ThresholdGray,
    /// Stretch of the central `p`% of the luminance population to the
    /// full output range.
    DynamicGray,
    /// Classic histogram equalization over the luminance population.
    EqualizeGray,
    /// Per-channel percentile threshold.
    ThresholdColor,
    /// Per-channel dynamic-range stretch.
    DynamicColor,
    /// Per-channel histogram equalization.
    EqualizeColor,
    /// Parametric gamma curve, exponent driven by the percentage.
    Gamma,
    /// Inversion: `LUT[i] = (levels-1) - i`.
    Negative,
}

impl LutKind {
    /// Kinds producing one independent curve per channel.
    #[inline]
    pub fn is_color(self) -> bool {
        matches!(
            self,
            Self::ThresholdColor | Self::DynamicColor | Self::EqualizeColor
        )
    }

    /// Kinds whose curve is a function of the histogram and must be
    /// recomputed on every update. Identity, Gamma and Negative depend
    /// only on the kind/parameter pair and are memoized instead.
    #[inline]
    pub fn histogram_dependent(self) -> bool {
        !matches!(self, Self::Identity | Self::Gamma | Self::Negative)
    }

    /// Kinds whose curve shape consumes the percentage parameter.
    #[inline]
    pub fn uses_parameter(self) -> bool {
        matches!(
            self,
            Self::Gamma
                | Self::ThresholdGray
                | Self::ThresholdColor
                | Self::DynamicGray
                | Self::DynamicColor
        )
    }

    /// Kinds requiring the parameter to lie strictly inside `(0, 100)`.
    #[inline]
    pub fn requires_open_interval(self) -> bool {
        matches!(
            self,
            Self::ThresholdGray | Self::ThresholdColor | Self::DynamicGray | Self::DynamicColor
        )
    }

    /// Gray kinds deriving from the luminance population.
    #[inline]
    pub fn requires_luminance(self) -> bool {
        matches!(
            self,
            Self::ThresholdGray | Self::DynamicGray | Self::EqualizeGray
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LutKind; 9] = [
        LutKind::Identity,
        LutKind::ThresholdGray,
        LutKind::DynamicGray,
        LutKind::EqualizeGray,
        LutKind::ThresholdColor,
        LutKind::DynamicColor,
        LutKind::EqualizeColor,
        LutKind::Gamma,
        LutKind::Negative,
    ];

    #[test]
    fn test_default_is_identity() {
        assert_eq!(LutKind::default(), LutKind::Identity);
    }

    #[test]
    fn test_color_kinds() {
        let color: Vec<_> = ALL.into_iter().filter(|k| k.is_color()).collect();
        assert_eq!(
            color,
            [
                LutKind::ThresholdColor,
                LutKind::DynamicColor,
                LutKind::EqualizeColor
            ]
        );
    }

    #[test]
    fn test_memoized_kinds_are_exactly_the_histogram_free_ones() {
        for kind in ALL {
            let memoized = matches!(
                kind,
                LutKind::Identity | LutKind::Gamma | LutKind::Negative
            );
            assert_eq!(kind.histogram_dependent(), !memoized, "{kind:?}");
        }
    }

    #[test]
    fn test_open_interval_kinds_use_parameter() {
        for kind in ALL {
            if kind.requires_open_interval() {
                assert!(kind.uses_parameter(), "{kind:?}");
            }
        }
    }
}
