//! # Feegrid Common
//!
//! Shared types and errors for the Feegrid billing engine.
//!
//! ## Core Types
//!
//! - [`FeeRequest`]: validated input tuple (plan name, usage, timestamp, optional age)
//! - [`FeeQuote`]: itemized calculation result
//! - [`BillingError`]: caller-facing failure kinds (`UnknownPlan`, opaque `Internal`)
//! - [`CatalogError`]: plan-catalog validation failures
//!
//! All monetary amounts, rates, and usage figures are
//! [`rust_decimal::Decimal`] values so fee arithmetic stays exact.

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{BillingError, CatalogError, ComputeError, FeegridError, Result};
pub use types::fee::{FeeQuote, FeeRequest};

/// Feegrid version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Highest hour key accepted by time-based rate tables
pub const MAX_HOUR_KEY: u8 = 23;

/// Highest weekday key accepted by day-based rate tables
/// (0 = Sunday ... 6 = Saturday)
pub const MAX_WEEKDAY_KEY: u8 = 6;
