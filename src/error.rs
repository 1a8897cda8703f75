//! Error types for defikit

use thiserror::Error;

/// Main error type for defikit operations
#[derive(Debug, Error)]
pub enum DefikitError {
    #[error("Toolkit not initialized: {0}")]
    NotInitialized(String),

    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Wallet error: {0}")]
    WalletError(String),

    #[error("RPC error: {0}")]
    RpcError(#[from] solana_client::client_error::ClientError),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for defikit operations
pub type DefikitResult<T> = Result<T, DefikitError>;
