//! # Feegrid Engine
//!
//! Pricing policies, plan catalog, and fee orchestration.
//!
//! ## Calculation Flow
//!
//! ```text
//! catalog -> registry -> engine
//! fee = policy(usage, date)
//! total = fee - fee × discount_rate(age)
//! ```
//!
//! The catalog declares plans as parameter records, the registry builds every
//! policy eagerly at construction, and [`FeeEngine`] resolves a plan name to
//! its policy per request. Registries are immutable after construction, so
//! one engine can serve concurrent callers without locking.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use feegrid_common::FeeRequest;
//! use feegrid_engine::FeeEngine;
//! use rust_decimal_macros::dec;
//!
//! let engine = FeeEngine::with_builtin_catalog();
//! let date = NaiveDate::from_ymd_opt(2024, 3, 11)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//!
//! let fee = engine
//!     .calculate_fee(&FeeRequest::new("timeBased", dec!(10), date))
//!     .unwrap();
//! assert_eq!(fee, dec!(1300));
//! ```

pub mod catalog;
pub mod engine;
pub mod policy;
pub mod registry;

pub use catalog::{
    AgeDiscountSpec, Catalog, DayBasedSpec, FixedRateSpec, PlanEntry, PlanSpec, TieredSpec,
    TimeBasedSpec,
};
pub use engine::FeeEngine;
pub use policy::{BillingPolicy, DiscountBracket, DiscountPolicy, Tier};
pub use registry::PolicyRegistry;
