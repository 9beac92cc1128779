//! Fee calculation request and quote types
//!
//! A [`FeeRequest`] is the validated tuple handed over by a transport
//! adapter: plan name, consumed usage, billing-local timestamp, and an
//! optional customer age. A [`FeeQuote`] is the itemized result.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request for a fee calculation
///
/// The timestamp is wall-clock time in the billing locale; hour-of-day and
/// weekday rates are read from it as-is, without timezone conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRequest {
    /// Registered plan name (e.g. "fixedRate", "tiered")
    pub plan_name: String,

    /// Consumed usage in plan units
    pub usage: Decimal,

    /// Billing-local timestamp the usage is priced at
    pub date: NaiveDateTime,

    /// Customer age, when an age-based discount may apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl FeeRequest {
    /// Create a new fee request without an age
    pub fn new(plan_name: impl Into<String>, usage: Decimal, date: NaiveDateTime) -> Self {
        Self {
            plan_name: plan_name.into(),
            usage,
            date,
            age: None,
        }
    }

    /// Set the customer age
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }
}

/// Itemized fee quote
///
/// `total = base_fee - discount_amount`, where
/// `discount_amount = base_fee * discount_rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    /// Plan the fee was computed against
    pub plan_name: String,

    /// Base fee before any discount
    pub base_fee: Decimal,

    /// Discount rate applied (0 when no discount policy matched)
    pub discount_rate: Decimal,

    /// Absolute discount amount
    pub discount_amount: Decimal,

    /// Final fee charged to the customer
    pub total: Decimal,

    /// Calculation timestamp (Unix millis)
    pub computed_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_request_builder() {
        let request = FeeRequest::new("fixedRate", dec!(10), sample_date()).with_age(70);

        assert_eq!(request.plan_name, "fixedRate");
        assert_eq!(request.usage, dec!(10));
        assert_eq!(request.age, Some(70));
    }

    #[test]
    fn test_request_json_field_names() {
        let request = FeeRequest::new("timeBased", dec!(5), sample_date());
        let json = serde_json::to_value(&request).unwrap();

        // Wire names match the original billing API
        assert!(json.get("planName").is_some());
        assert!(json.get("usage").is_some());
        assert!(json.get("date").is_some());
        // Absent age is omitted entirely
        assert!(json.get("age").is_none());
    }
}
