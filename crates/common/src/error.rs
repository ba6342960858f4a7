//! Universal error types for Lantern.
//!
//! Withheld values are NOT errors: a balance waiting on decimals or a
//! price is represented as `None` downstream, never as a variant here.

use thiserror::Error;

use crate::types::ChainId;

/// Top-level error type for all Lantern operations.
#[derive(Debug, Error)]
pub enum LanternError {
    /// Chain id not present in the registry. Fatal for that chain's
    /// row only — the rest of the portfolio keeps rendering.
    #[error("Unknown chain: {0}")]
    UnknownChain(ChainId),

    /// Surfaced from the external signer. Shown inline next to the
    /// input; never tears down the dialog.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Subscription feed transport failure.
    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type LanternResult<T> = Result<T, LanternError>;
