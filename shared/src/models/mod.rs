//! Domain models

mod payment;
mod rates;

pub use payment::{
    Beneficiary, ChargeStatus, PaymentRecord, PaymentStatus, SplitComputation, SplitKind,
};
pub use rates::{CommissionSpec, RateSchedule};
