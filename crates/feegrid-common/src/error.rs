//! Error types for the Feegrid billing system
//!
//! Provides a unified error type and domain-specific error variants

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using FeegridError
pub type Result<T> = std::result::Result<T, FeegridError>;

/// Unified error type for Feegrid operations
#[derive(Debug, Error)]
pub enum FeegridError {
    // Billing errors
    #[error("Billing error: {0}")]
    Billing(#[from] BillingError),

    // Catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // Fee computation errors
    #[error("Computation error: {0}")]
    Compute(#[from] ComputeError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors surfaced to billing callers
///
/// `UnknownPlan` is a client fault and carries the offending plan name.
/// `Internal` is deliberately opaque: the cause is recorded in the logs at
/// the containment point and never leaks through `Display`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    #[error("Unknown plan type: {plan}")]
    UnknownPlan { plan: String },

    #[error("An error occurred while calculating the fee")]
    Internal,
}

/// Fee arithmetic errors inside a billing policy
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComputeError {
    #[error("Fee arithmetic overflow")]
    Overflow,
}

/// Plan catalog validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate plan name: {plan}")]
    DuplicatePlan { plan: String },

    #[error("Duplicate tier threshold {threshold} in plan {plan}")]
    DuplicateTierThreshold { plan: String, threshold: Decimal },

    #[error("Hour key {hour} out of range 0-23 in plan {plan}")]
    HourOutOfRange { plan: String, hour: u8 },

    #[error("Weekday key {weekday} out of range 0-6 in plan {plan}")]
    WeekdayOutOfRange { plan: String, weekday: u8 },

    #[error("Discount rate {rate} out of range [0, 1) in plan {plan}")]
    DiscountRateOutOfRange { plan: String, rate: Decimal },

    #[error("Discount brackets for plan {plan} must be ordered by descending age threshold")]
    UnorderedDiscountBrackets { plan: String },

    #[error("Discount table for plan {plan} has no 0-age bracket")]
    MissingZeroAgeBracket { plan: String },
}

// Implement From for common external error types
impl From<serde_json::Error> for FeegridError {
    fn from(err: serde_json::Error) -> Self {
        FeegridError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for FeegridError {
    fn from(err: std::io::Error) -> Self {
        FeegridError::Config(err.to_string())
    }
}

impl From<anyhow::Error> for FeegridError {
    fn from(err: anyhow::Error) -> Self {
        FeegridError::Internal(err.to_string())
    }
}
