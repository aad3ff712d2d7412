//! Unified error type for the split engine
//!
//! Split-eligibility misses (charge not settled yet, split already created)
//! are deliberately *not* errors — they are expected control-flow outcomes
//! modeled by the policy layer. Everything here aborts the attempt.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias used across the workspace
pub type SplitResult<T> = Result<T, SplitError>;

/// Errors raised while computing fees or constructing a split
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SplitError {
    /// Invalid rate schedule or commission configuration.
    /// Raised synchronously at computation time, never silently clamped.
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// The computed parts do not sum to the whole.
    /// Defensive check; unreachable when configuration validation passes.
    #[error("split parts sum to {actual}, expected {expected}")]
    InvariantViolation { expected: Decimal, actual: Decimal },

    /// An affiliate commission is owed but no payout destination exists.
    /// The split must fail closed rather than submit an unbalanced request.
    #[error("affiliate {affiliate_id} is owed {amount} but has no payout destination")]
    UnresolvedBeneficiary {
        affiliate_id: String,
        amount: Decimal,
    },

    /// Persistence collaborator failure
    #[error("payment store error: {0}")]
    Store(String),

    /// Payment gateway collaborator failure
    #[error("payment gateway error: {0}")]
    Gateway(String),
}

impl SplitError {
    /// Create a configuration error with a custom message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for errors that indicate bad input rather than a runtime fault
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
