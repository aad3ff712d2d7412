//! Shared types for the payment split engine
//!
//! Common value types used across the workspace: money helpers, rate
//! configuration, computed split amounts, payment records, and the unified
//! error type.

pub mod error;
pub mod models;
pub mod money;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{SplitError, SplitResult};
pub use models::{
    Beneficiary, ChargeStatus, CommissionSpec, PaymentRecord, PaymentStatus, RateSchedule,
    SplitComputation, SplitKind,
};
