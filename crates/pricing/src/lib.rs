//! Derived pricing for the Lagoon front end
//!
//! This crate combines the AMM quote adapter and the indexer adapter into
//! the derived quantities the UI displays: exchange rate, price impact,
//! reserves-implied price, pool APR, and add-liquidity previews.
//!
//! The derivations themselves are pure functions; fetching, staleness, and
//! in-flight deduplication live in an explicit keyed cache driven by the
//! [`engine::PricingEngine`].

pub mod apr;
pub mod cache;
pub mod engine;
pub mod impact;
pub mod liquidity;
pub mod rate;
pub mod state;

// Re-exports
pub use apr::{annualized_apr, total_fees};
pub use cache::{CacheStatus, Clock, FetchState, FetchTicket, QueryCache, SystemClock};
pub use engine::PricingEngine;
pub use impact::{impact_severity, price_impact, ImpactSeverity, IMPACT_HIDDEN, IMPACT_MAX};
pub use liquidity::counterpart_amount;
pub use rate::{exchange_rate, preview_price};
pub use state::{AprResult, Derived, ReservesPriceKey, ReservesPriceRequest};
