//! Error taxonomies for the router core and the emission scheduler.
//!
//! Collaborator failures cross the host seam as `anyhow::Error` and are
//! wrapped transparently; they are never retried or masked. Arithmetic is
//! checked everywhere, so overflow is a reported error rather than a wrap.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("identical assets in pair")]
    IdenticalAssets,
    #[error("zero address asset")]
    ZeroAddress,
    #[error("invalid path")]
    InvalidPath,
    #[error("deadline expired")]
    Expired,
    #[error("desired amount below minimum")]
    BelowDesiredMinimum,
    #[error("insufficient amount")]
    InsufficientAmount,
    #[error("insufficient liquidity")]
    InsufficientLiquidity,
    #[error("insufficient A amount")]
    InsufficientAAmount,
    #[error("insufficient B amount")]
    InsufficientBAmount,
    #[error("insufficient output amount")]
    InsufficientOutputAmount,
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error(transparent)]
    Host(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum MinterError {
    #[error("caller is not the initializer")]
    NotInitializer,
    #[error("already initialized")]
    AlreadyInitialized,
    #[error("caller is not the team")]
    NotTeam,
    #[error("caller is not the pending team")]
    NotPendingTeam,
    #[error("rate exceeds maximum")]
    RateTooHigh,
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error(transparent)]
    Host(#[from] anyhow::Error),
}
