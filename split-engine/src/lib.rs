//! Payment split engine
//!
//! The computation core of the ticketing platform's payment flow: given a
//! base ticket price, an installment count, an optional affiliate commission
//! and the platform's rate schedule, deterministically divide one payment
//! among the platform, the event organizer and (optionally) an affiliate,
//! then decide when that division may be submitted to the payment gateway
//! as a funds split.
//!
//! - [`fees`] — pure fee arithmetic, no I/O
//! - [`policy`] — split authorization and beneficiary construction
//! - [`store`] / [`gateway`] — collaborator seams (persistence, gateway)
//! - [`service`] — thin orchestration called from request handlers

pub mod fees;
pub mod gateway;
pub mod policy;
pub mod service;
pub mod store;

pub use shared::{SplitError, SplitResult};
