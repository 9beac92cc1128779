//! Policy module
//!
//! Closed sets of billing and discount policy variants:
//! - [`BillingPolicy`]: FixedRate, TimeBased, DayBased, Tiered
//! - [`DiscountPolicy`]: AgeBased

pub mod billing;
pub mod discount;

pub use billing::{BillingPolicy, Tier};
pub use discount::{DiscountBracket, DiscountPolicy};
