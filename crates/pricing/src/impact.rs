//! Price impact derivation
//!
//! Impact is reported only as an adverse deviation: a trade that improves
//! or holds the reserves price reads as zero impact.

use serde::{Deserialize, Serialize};

/// Sentinel for "not computable yet". Distinct from a true zero-impact
/// trade so the UI can hide the figure instead of showing 0.
pub const IMPACT_HIDDEN: f64 = -1.0;

/// Display ceiling for pathological inputs (near-empty pools)
pub const IMPACT_MAX: f64 = 99.99;

/// Above this the UI styles the figure as high impact
const HIGH_IMPACT_PERCENT: f64 = 5.0;
/// Above this (up to the high band) the figure is medium impact
const MEDIUM_IMPACT_PERCENT: f64 = 2.0;

/// Severity band for UI styling. The thresholds are part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactSeverity {
    Normal,
    Medium,
    High,
}

/// Adverse price deviation of the simulated trade, in percent.
///
/// Returns [`IMPACT_HIDDEN`] when either price is missing or the reserves
/// price is zero, `0.0` when the trade holds or improves the price, and
/// otherwise `(reserves - preview) / reserves * 100` capped at
/// [`IMPACT_MAX`].
pub fn price_impact(reserves_price: Option<f64>, preview_price: Option<f64>) -> f64 {
    let (reserves, preview) = match (reserves_price, preview_price) {
        (Some(r), Some(p)) if r != 0.0 && r.is_finite() && p.is_finite() => (r, p),
        _ => return IMPACT_HIDDEN,
    };

    if reserves <= preview {
        return 0.0;
    }

    let impact = (reserves - preview) / reserves * 100.0;
    impact.min(IMPACT_MAX)
}

/// Band an impact figure for styling
pub fn impact_severity(impact: f64) -> ImpactSeverity {
    if impact > HIGH_IMPACT_PERCENT {
        ImpactSeverity::High
    } else if impact > MEDIUM_IMPACT_PERCENT {
        ImpactSeverity::Medium
    } else {
        ImpactSeverity::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_when_undefined() {
        assert_eq!(price_impact(None, Some(1.0)), IMPACT_HIDDEN);
        assert_eq!(price_impact(Some(1.0), None), IMPACT_HIDDEN);
        assert_eq!(price_impact(None, None), IMPACT_HIDDEN);
    }

    #[test]
    fn test_hidden_when_reserves_price_zero() {
        assert_eq!(price_impact(Some(0.0), Some(1.0)), IMPACT_HIDDEN);
    }

    #[test]
    fn test_zero_when_trade_improves_price() {
        assert_eq!(price_impact(Some(100.0), Some(100.0)), 0.0);
        assert_eq!(price_impact(Some(100.0), Some(150.0)), 0.0);
    }

    #[test]
    fn test_adverse_deviation() {
        assert_eq!(price_impact(Some(100.0), Some(50.0)), 50.0);
        assert_eq!(price_impact(Some(200.0), Some(150.0)), 25.0);
    }

    #[test]
    fn test_clamped_at_display_max() {
        assert_eq!(price_impact(Some(1_000_000.0), Some(1.0)), IMPACT_MAX);
        assert_eq!(price_impact(Some(f64::MAX), Some(1.0)), IMPACT_MAX);
    }

    #[test]
    fn test_never_exceeds_max_for_any_adverse_pair() {
        for &(reserves, preview) in &[(1e12, 1e-12), (2.0, 1.9), (100.0, 0.0)] {
            let impact = price_impact(Some(reserves), Some(preview));
            assert!(impact <= IMPACT_MAX, "impact {} for ({}, {})", impact, reserves, preview);
        }
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(impact_severity(IMPACT_HIDDEN), ImpactSeverity::Normal);
        assert_eq!(impact_severity(0.0), ImpactSeverity::Normal);
        assert_eq!(impact_severity(2.0), ImpactSeverity::Normal);
        assert_eq!(impact_severity(2.1), ImpactSeverity::Medium);
        assert_eq!(impact_severity(5.0), ImpactSeverity::Medium);
        assert_eq!(impact_severity(5.1), ImpactSeverity::High);
        assert_eq!(impact_severity(IMPACT_MAX), ImpactSeverity::High);
    }

    #[test]
    fn test_nan_inputs_read_as_hidden() {
        assert_eq!(price_impact(Some(f64::NAN), Some(1.0)), IMPACT_HIDDEN);
        assert_eq!(price_impact(Some(1.0), Some(f64::NAN)), IMPACT_HIDDEN);
    }
}
