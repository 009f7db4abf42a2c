//! Error types for Lagoon

use thiserror::Error;

/// Core errors that can occur in Lagoon
#[derive(Debug, Error)]
pub enum Error {
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    #[error("Indexer error: {0}")]
    Indexer(#[from] IndexerError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Quote service errors: the adapter could not produce a swap preview
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("No route with sufficient liquidity")]
    NoLiquidity,

    #[error("Quote service unreachable at {url}")]
    Unreachable { url: String },

    #[error("Quote service returned error: {message}")]
    ApiError { message: String },

    #[error("Failed to parse quote response: {0}")]
    ParseError(String),
}

/// Indexer transport and parse errors
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Indexer unreachable at {url}")]
    Unreachable { url: String },

    #[error("Indexer returned errors: {message}")]
    ApiError { message: String },

    #[error("Failed to parse indexer response: {0}")]
    ParseError(String),
}

/// Result type alias for Lagoon operations
pub type Result<T> = std::result::Result<T, Error>;

impl QuoteError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoLiquidity => "no_liquidity",
            Self::Unreachable { .. } => "quote_unavailable",
            Self::ApiError { .. } => "quote_api_error",
            Self::ParseError(_) => "quote_parse_error",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NoLiquidity => 422,
            Self::Unreachable { .. } => 503,
            Self::ApiError { .. } | Self::ParseError(_) => 502,
        }
    }
}

impl IndexerError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "indexer_unavailable",
            Self::ApiError { .. } => "indexer_api_error",
            Self::ParseError(_) => "indexer_parse_error",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unreachable { .. } => 503,
            Self::ApiError { .. } | Self::ParseError(_) => 502,
        }
    }
}
