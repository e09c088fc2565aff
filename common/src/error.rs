//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

use crate::protocol::{DATA_REQUIRED_MESSAGE, SIGNATURE_REQUIRED_MESSAGE};

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Record store error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// Write request without a (non-empty) signature
    #[error("{}", SIGNATURE_REQUIRED_MESSAGE)]
    SignatureRequired,

    /// Write request without data while the store requires both fields
    #[error("{}", DATA_REQUIRED_MESSAGE)]
    DataRequired,
}

/// Signing agent error type
#[derive(Debug, Error)]
pub enum AgentError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// The cryptographic provider could not produce a key; the session is unusable
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Transport failure talking to the record store (unreachable, non-2xx, bad body)
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Local backup storage failure
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Common result type
pub type CommonResult<T> = Result<T, CommonError>;

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Agent result type
pub type AgentResult<T> = Result<T, AgentError>;
