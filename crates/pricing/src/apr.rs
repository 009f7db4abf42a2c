//! APR derivation from trailing fee revenue

use indexer_client::PoolSnapshot;

/// Days used for annualization
const DAYS_PER_YEAR: f64 = 365.0;

/// Total fee revenue across a snapshot window
pub fn total_fees(snapshots: &[PoolSnapshot]) -> f64 {
    snapshots.iter().map(|s| s.fees_usd).sum()
}

/// Annualize a 24-hour fee total against TVL, in percent:
/// `fees * 365 / tvl * 100`.
///
/// Zero (or missing) TVL yields zero rather than a division error.
pub fn annualized_apr(fees_24h: f64, tvl_usd: f64) -> f64 {
    if tvl_usd <= 0.0 {
        return 0.0;
    }
    fees_24h * DAYS_PER_YEAR / tvl_usd * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(fees_usd: f64, timestamp: i64) -> PoolSnapshot {
        PoolSnapshot {
            fees_usd,
            timestamp,
        }
    }

    #[test]
    fn test_total_fees_sums_window() {
        let snapshots = vec![snapshot(10.0, 1), snapshot(15.5, 2), snapshot(0.0, 3)];
        assert_eq!(total_fees(&snapshots), 25.5);
    }

    #[test]
    fn test_total_fees_empty_window() {
        assert_eq!(total_fees(&[]), 0.0);
    }

    #[test]
    fn test_apr_formula() {
        // 100 USD of fees in 24h on 1M TVL: 100 * 365 / 1_000_000 * 100 = 3.65%
        assert_eq!(annualized_apr(100.0, 1_000_000.0), 3.65);
    }

    #[test]
    fn test_apr_zero_tvl_is_zero_not_an_error() {
        assert_eq!(annualized_apr(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_apr_zero_fees() {
        assert_eq!(annualized_apr(0.0, 1_000_000.0), 0.0);
    }
}
