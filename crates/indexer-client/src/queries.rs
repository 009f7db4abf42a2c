//! GraphQL query documents for the indexer
//!
//! Parameterized documents; variables are passed alongside, never
//! interpolated into the query text.

/// Fee snapshots for a pool since a unix-seconds lower bound
pub const POOL_SNAPSHOTS_QUERY: &str = r#"
  query GetPoolSnapshots($poolId: String!, $since: Int!) {
    pool(id: $poolId) {
      snapshots(where: {timestamp_gt: $since}) {
        feesUSD
        timestamp
      }
    }
  }
"#;

/// Current TVL and decimal reserves for a pool
pub const POOL_STATE_QUERY: &str = r#"
  query GetPoolState($poolId: String!) {
    pool(id: $poolId) {
      tvlUSD
      reserve0Decimal
      reserve1Decimal
    }
  }
"#;

/// Display metadata for an asset
pub const ASSET_QUERY: &str = r#"
  query GetAsset($assetId: String!) {
    asset(id: $assetId) {
      symbol
      decimals
    }
  }
"#;

/// Reserves and TVL for a set of pools (list views)
pub const POOLS_WITH_RESERVES_QUERY: &str = r#"
  query GetPoolsWithReserves($poolIds: [String!]) {
    pools(where: {id_in: $poolIds}) {
      id
      tvlUSD
      reserve0Decimal
      reserve1Decimal
    }
  }
"#;
