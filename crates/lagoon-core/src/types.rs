//! Core type definitions for Lagoon

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fungible asset ID (32 bytes, hex-encoded)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct AssetId(String);

impl AssetId {
    /// Create an asset ID, normalizing to lowercase hex
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AssetId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Asset display metadata resolved from the indexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub symbol: String,
    /// Decimal places; 0 when metadata is unavailable
    #[serde(default)]
    pub decimals: u8,
}

impl Default for AssetMetadata {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            decimals: 0,
        }
    }
}

/// An asset ID together with its resolved metadata.
///
/// Immutable once resolved; the engine memoizes these per asset ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReference {
    pub asset_id: AssetId,
    #[serde(default)]
    pub metadata: AssetMetadata,
}

impl AssetReference {
    pub fn new(asset_id: AssetId, metadata: AssetMetadata) -> Self {
        Self { asset_id, metadata }
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }
}

/// Which side of the swap form an amount belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Sell,
    Buy,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Sell => Self::Buy,
            Self::Buy => Self::Sell,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sell => write!(f, "sell"),
            Self::Buy => write!(f, "buy"),
        }
    }
}

/// One side of the swap form: selected asset plus a human-unit amount string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwapSide {
    pub asset_id: Option<AssetId>,
    /// Decimal string in display units, as typed by the user
    #[serde(default)]
    pub amount: String,
}

/// The swap form state: exactly a `sell` and a `buy` side.
///
/// `sell.asset_id != buy.asset_id` is expected but enforced upstream,
/// not by this layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwapState {
    pub sell: SwapSide,
    pub buy: SwapSide,
}

impl SwapState {
    pub fn side(&self, side: Side) -> &SwapSide {
        match side {
            Side::Sell => &self.sell,
            Side::Buy => &self.buy,
        }
    }
}

/// Pool identifier: an ordered asset pair plus the stable-pool flag.
///
/// Asset IDs are equal-length hex strings, so lexicographic order on the
/// normalized form matches numeric order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolId {
    pub asset_a: AssetId,
    pub asset_b: AssetId,
    pub stable: bool,
}

impl PoolId {
    /// Build a pool ID in canonical order: `canonical(a, b, s) == canonical(b, a, s)`
    pub fn canonical(asset_a: AssetId, asset_b: AssetId, stable: bool) -> Self {
        if asset_a <= asset_b {
            Self {
                asset_a,
                asset_b,
                stable,
            }
        } else {
            Self {
                asset_a: asset_b,
                asset_b: asset_a,
                stable,
            }
        }
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.asset_a, self.asset_b, self.stable)
    }
}
