//! Billing policy variants
//!
//! Each variant owns its rate configuration by value and computes a base fee
//! from `(usage, date)`. The set of variants is closed on purpose: the
//! supported plan kinds stay statically checkable, and adding one is a
//! compile-time event, not a runtime registration.

use chrono::{Datelike, NaiveDateTime, Timelike};
use feegrid_common::ComputeError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Usage bracket for cascading-cap billing
///
/// `additional_fee` is charged once whenever the remaining usage exceeds
/// `threshold`, on top of the per-unit `rate` for the usage inside the
/// bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    /// Lower bound of the bracket (exclusive)
    pub threshold: Decimal,
    /// Per-unit rate for usage above the threshold
    pub rate: Decimal,
    /// Flat fee charged once when the bracket applies
    pub additional_fee: Decimal,
}

/// A configured, immutable billing policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingPolicy {
    /// Flat fee regardless of usage or date
    FixedRate {
        fixed_rate: Decimal,
        surcharge: Decimal,
    },
    /// Per-unit rate keyed by hour of day (0-23); absent hours rate 0
    TimeBased {
        rates_by_hour: BTreeMap<u8, Decimal>,
        surcharge: Decimal,
    },
    /// Per-unit rate keyed by weekday (0 = Sunday ... 6 = Saturday);
    /// absent days rate 0
    DayBased {
        rates_by_day: BTreeMap<u8, Decimal>,
        surcharge: Decimal,
    },
    /// Cascading-cap tiers, stored sorted by descending threshold
    Tiered {
        tiers: Vec<Tier>,
        surcharge: Decimal,
    },
}

impl BillingPolicy {
    /// Compute the base fee for the given usage and billing-local timestamp
    pub fn calculate_fee(
        &self,
        usage: Decimal,
        date: NaiveDateTime,
    ) -> Result<Decimal, ComputeError> {
        match self {
            BillingPolicy::FixedRate {
                fixed_rate,
                surcharge,
            } => add(*fixed_rate, *surcharge),

            BillingPolicy::TimeBased {
                rates_by_hour,
                surcharge,
            } => {
                let hour = date.hour() as u8;
                let rate = rates_by_hour.get(&hour).copied().unwrap_or(Decimal::ZERO);
                add(mul(usage, rate)?, *surcharge)
            }

            BillingPolicy::DayBased {
                rates_by_day,
                surcharge,
            } => {
                let weekday = date.weekday().num_days_from_sunday() as u8;
                let rate = rates_by_day.get(&weekday).copied().unwrap_or(Decimal::ZERO);
                add(mul(usage, rate)?, *surcharge)
            }

            BillingPolicy::Tiered { tiers, surcharge } => {
                let mut remaining = usage;
                let mut total = Decimal::ZERO;
                // Tiers are sorted highest threshold first at construction;
                // each qualifying tier charges its rate on the slice above
                // its threshold plus its flat additional fee, then caps the
                // remaining usage at the threshold.
                for tier in tiers {
                    if remaining > tier.threshold {
                        let in_tier = sub(remaining, tier.threshold)?;
                        total = add(total, add(mul(in_tier, tier.rate)?, tier.additional_fee)?)?;
                        remaining = tier.threshold;
                    }
                }
                add(total, *surcharge)
            }
        }
    }
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, ComputeError> {
    a.checked_add(b).ok_or(ComputeError::Overflow)
}

fn sub(a: Decimal, b: Decimal) -> Result<Decimal, ComputeError> {
    a.checked_sub(b).ok_or(ComputeError::Overflow)
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, ComputeError> {
    a.checked_mul(b).ok_or(ComputeError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at(hour: u32) -> NaiveDateTime {
        // 2024-03-11 is a Monday
        NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn on_weekday(day: u32) -> NaiveDateTime {
        // 2024-03-10 is a Sunday, so day 0..=6 maps onto that week
        NaiveDate::from_ymd_opt(2024, 3, 10 + day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_fixed_rate_ignores_usage_and_date() {
        let policy = BillingPolicy::FixedRate {
            fixed_rate: dec!(1000),
            surcharge: dec!(500),
        };

        assert_eq!(policy.calculate_fee(dec!(0), at(9)).unwrap(), dec!(1500));
        assert_eq!(
            policy.calculate_fee(dec!(9999), on_weekday(6)).unwrap(),
            dec!(1500)
        );
    }

    #[test]
    fn test_time_based_rate_lookup() {
        let policy = BillingPolicy::TimeBased {
            rates_by_hour: BTreeMap::from([(9, dec!(100)), (18, dec!(200))]),
            surcharge: dec!(300),
        };

        // 10 * 100 + 300 = 1300
        assert_eq!(policy.calculate_fee(dec!(10), at(9)).unwrap(), dec!(1300));
        // 10 * 200 + 300 = 2300
        assert_eq!(policy.calculate_fee(dec!(10), at(18)).unwrap(), dec!(2300));
    }

    #[test]
    fn test_time_based_absent_hour_defaults_to_zero_rate() {
        let policy = BillingPolicy::TimeBased {
            rates_by_hour: BTreeMap::from([(9, dec!(100)), (18, dec!(200))]),
            surcharge: dec!(300),
        };

        // Hour 12 is not configured: 10 * 0 + 300 = 300
        assert_eq!(policy.calculate_fee(dec!(10), at(12)).unwrap(), dec!(300));
    }

    #[test]
    fn test_day_based_rate_lookup() {
        let policy = BillingPolicy::DayBased {
            rates_by_day: BTreeMap::from([(0, dec!(500)), (6, dec!(1000))]),
            surcharge: dec!(200),
        };

        // Saturday: 2 * 1000 + 200 = 2200
        assert_eq!(
            policy.calculate_fee(dec!(2), on_weekday(6)).unwrap(),
            dec!(2200)
        );
        // Sunday: 2 * 500 + 200 = 1200
        assert_eq!(
            policy.calculate_fee(dec!(2), on_weekday(0)).unwrap(),
            dec!(1200)
        );
        // Wednesday is not configured: 2 * 0 + 200 = 200
        assert_eq!(
            policy.calculate_fee(dec!(2), on_weekday(3)).unwrap(),
            dec!(200)
        );
    }

    fn tiered() -> BillingPolicy {
        BillingPolicy::Tiered {
            tiers: vec![
                Tier {
                    threshold: dec!(1000),
                    rate: dec!(0.1),
                    additional_fee: dec!(1000),
                },
                Tier {
                    threshold: dec!(500),
                    rate: dec!(0.2),
                    additional_fee: dec!(500),
                },
                Tier {
                    threshold: dec!(0),
                    rate: dec!(0.3),
                    additional_fee: dec!(0),
                },
            ],
            surcharge: dec!(100),
        }
    }

    #[test]
    fn test_tiered_cascading_cap() {
        // usage 1500:
        //   (1500-1000)*0.1 + 1000 = 1050
        //   (1000-500)*0.2  + 500  =  600
        //   (500-0)*0.3     + 0    =  150
        // + surcharge 100          = 1900
        assert_eq!(tiered().calculate_fee(dec!(1500), at(0)).unwrap(), dec!(1900));
    }

    #[test]
    fn test_tiered_usage_at_threshold_stays_below_bracket() {
        // usage 500 does not exceed the 500 threshold, so only the base
        // bracket applies: 500*0.3 + 100 = 250
        assert_eq!(tiered().calculate_fee(dec!(500), at(0)).unwrap(), dec!(250));
    }

    #[test]
    fn test_tiered_zero_usage_charges_surcharge_only() {
        assert_eq!(tiered().calculate_fee(dec!(0), at(0)).unwrap(), dec!(100));
    }

    #[test]
    fn test_overflow_is_contained() {
        let policy = BillingPolicy::TimeBased {
            rates_by_hour: BTreeMap::from([(9, Decimal::MAX)]),
            surcharge: dec!(0),
        };

        assert_eq!(
            policy.calculate_fee(Decimal::MAX, at(9)),
            Err(ComputeError::Overflow)
        );
    }
}
