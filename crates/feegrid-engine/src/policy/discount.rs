//! Discount policy variants
//!
//! A discount policy turns customer attributes into a rate in `[0, 1)` that
//! the orchestrator subtracts from the base fee. Age-based is the only
//! variant today; the enum leaves room for more.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of an age-based discount table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountBracket {
    /// Minimum age (inclusive) for this bracket
    pub age_threshold: u32,
    /// Discount rate granted, in `[0, 1)`
    pub rate: Decimal,
}

/// A configured, immutable discount policy
///
/// The bracket list is an explicitly ordered sequence: brackets are consulted
/// top to bottom and the first one whose threshold the age meets wins.
/// Configuration supplies the descending order; the policy never re-sorts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountPolicy {
    AgeBased(Vec<DiscountBracket>),
}

impl DiscountPolicy {
    /// Discount rate for the given age; 0 when no bracket qualifies
    pub fn discount_rate(&self, age: u32) -> Decimal {
        match self {
            DiscountPolicy::AgeBased(brackets) => brackets
                .iter()
                .find(|bracket| age >= bracket.age_threshold)
                .map(|bracket| bracket.rate)
                .unwrap_or(Decimal::ZERO),
        }
    }
}
