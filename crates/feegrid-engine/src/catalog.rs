//! Plan catalog
//!
//! The catalog is the configuration side of the engine: per-kind parameter
//! records that build fully configured policy instances, grouped into named
//! plan entries. Parameter records do no computation beyond copying their
//! configuration into the policy (Tiered additionally sorts its tiers by
//! descending threshold, which the cascading-cap algorithm requires).
//!
//! A catalog can be the hard-coded [`Catalog::builtin`] table or be loaded
//! from JSON ([`Catalog::from_json_str`] / [`Catalog::from_json_file`]).
//! [`Catalog::validate`] enforces the invariants the policies themselves
//! assume but never re-check.

use crate::policy::{BillingPolicy, DiscountBracket, DiscountPolicy, Tier};
use feegrid_common::{CatalogError, FeegridError, MAX_HOUR_KEY, MAX_WEEKDAY_KEY};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Parameters for a fixed-rate plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedRateSpec {
    pub fixed_rate: Decimal,
    pub surcharge: Decimal,
}

impl FixedRateSpec {
    pub fn build(&self) -> BillingPolicy {
        BillingPolicy::FixedRate {
            fixed_rate: self.fixed_rate,
            surcharge: self.surcharge,
        }
    }
}

/// Parameters for an hour-of-day plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBasedSpec {
    pub rates_by_hour: BTreeMap<u8, Decimal>,
    pub surcharge: Decimal,
}

impl TimeBasedSpec {
    pub fn build(&self) -> BillingPolicy {
        BillingPolicy::TimeBased {
            rates_by_hour: self.rates_by_hour.clone(),
            surcharge: self.surcharge,
        }
    }
}

/// Parameters for a weekday plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBasedSpec {
    pub rates_by_day: BTreeMap<u8, Decimal>,
    pub surcharge: Decimal,
}

impl DayBasedSpec {
    pub fn build(&self) -> BillingPolicy {
        BillingPolicy::DayBased {
            rates_by_day: self.rates_by_day.clone(),
            surcharge: self.surcharge,
        }
    }
}

/// Parameters for a cascading-cap tiered plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredSpec {
    pub tiers: Vec<Tier>,
    pub surcharge: Decimal,
}

impl TieredSpec {
    pub fn build(&self) -> BillingPolicy {
        let mut tiers = self.tiers.clone();
        // The cascading-cap algorithm walks tiers highest threshold first.
        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        BillingPolicy::Tiered {
            tiers,
            surcharge: self.surcharge,
        }
    }
}

/// Parameters for an age-based discount table
///
/// Brackets must be listed in descending age-threshold order and end with a
/// 0-age bracket; [`Catalog::validate`] rejects anything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeDiscountSpec {
    pub brackets: Vec<DiscountBracket>,
}

impl AgeDiscountSpec {
    pub fn build(&self) -> DiscountPolicy {
        DiscountPolicy::AgeBased(self.brackets.clone())
    }
}

/// Tagged union over the billing plan parameter records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanSpec {
    FixedRate(FixedRateSpec),
    TimeBased(TimeBasedSpec),
    DayBased(DayBasedSpec),
    Tiered(TieredSpec),
}

impl PlanSpec {
    pub fn build(&self) -> BillingPolicy {
        match self {
            PlanSpec::FixedRate(spec) => spec.build(),
            PlanSpec::TimeBased(spec) => spec.build(),
            PlanSpec::DayBased(spec) => spec.build(),
            PlanSpec::Tiered(spec) => spec.build(),
        }
    }
}

/// One named plan: a billing spec plus at most one discount spec
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub name: String,
    pub spec: PlanSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<AgeDiscountSpec>,
}

/// The full plan configuration of a billing deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub plans: Vec<PlanEntry>,
}

impl Catalog {
    /// The production plan table
    pub fn builtin() -> Self {
        Self {
            plans: vec![
                PlanEntry {
                    name: "fixedRate".to_string(),
                    spec: PlanSpec::FixedRate(FixedRateSpec {
                        fixed_rate: dec!(1000),
                        surcharge: dec!(500),
                    }),
                    discount: None,
                },
                PlanEntry {
                    name: "timeBased".to_string(),
                    spec: PlanSpec::TimeBased(TimeBasedSpec {
                        rates_by_hour: BTreeMap::from([(9, dec!(100)), (18, dec!(200))]),
                        surcharge: dec!(300),
                    }),
                    discount: None,
                },
                PlanEntry {
                    name: "dayBased".to_string(),
                    spec: PlanSpec::DayBased(DayBasedSpec {
                        rates_by_day: BTreeMap::from([(0, dec!(500)), (6, dec!(1000))]),
                        surcharge: dec!(200),
                    }),
                    discount: None,
                },
                PlanEntry {
                    name: "tiered".to_string(),
                    spec: PlanSpec::Tiered(TieredSpec {
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
                    }),
                    discount: None,
                },
                // Fixed-rate plan with the senior/adult/child discount table
                PlanEntry {
                    name: "ageBasedDiscount".to_string(),
                    spec: PlanSpec::FixedRate(FixedRateSpec {
                        fixed_rate: dec!(1000),
                        surcharge: dec!(500),
                    }),
                    discount: Some(AgeDiscountSpec {
                        brackets: vec![
                            DiscountBracket {
                                age_threshold: 65,
                                rate: dec!(0.2),
                            },
                            DiscountBracket {
                                age_threshold: 20,
                                rate: dec!(0.1),
                            },
                            DiscountBracket {
                                age_threshold: 0,
                                rate: dec!(0.05),
                            },
                        ],
                    }),
                },
            ],
        }
    }

    /// Parse a catalog from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, FeegridError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FeegridError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Check the invariants the policies assume but never re-derive
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut names: HashSet<&str> = HashSet::new();

        for entry in &self.plans {
            if !names.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicatePlan {
                    plan: entry.name.clone(),
                });
            }

            match &entry.spec {
                PlanSpec::FixedRate(_) => {}
                PlanSpec::TimeBased(spec) => {
                    for hour in spec.rates_by_hour.keys() {
                        if *hour > MAX_HOUR_KEY {
                            return Err(CatalogError::HourOutOfRange {
                                plan: entry.name.clone(),
                                hour: *hour,
                            });
                        }
                    }
                }
                PlanSpec::DayBased(spec) => {
                    for weekday in spec.rates_by_day.keys() {
                        if *weekday > MAX_WEEKDAY_KEY {
                            return Err(CatalogError::WeekdayOutOfRange {
                                plan: entry.name.clone(),
                                weekday: *weekday,
                            });
                        }
                    }
                }
                PlanSpec::Tiered(spec) => {
                    let mut thresholds: HashSet<Decimal> = HashSet::new();
                    for tier in &spec.tiers {
                        if !thresholds.insert(tier.threshold) {
                            return Err(CatalogError::DuplicateTierThreshold {
                                plan: entry.name.clone(),
                                threshold: tier.threshold,
                            });
                        }
                    }
                }
            }

            if let Some(discount) = &entry.discount {
                Self::validate_brackets(&entry.name, &discount.brackets)?;
            }
        }

        Ok(())
    }

    fn validate_brackets(
        plan: &str,
        brackets: &[DiscountBracket],
    ) -> Result<(), CatalogError> {
        for bracket in brackets {
            if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
                return Err(CatalogError::DiscountRateOutOfRange {
                    plan: plan.to_string(),
                    rate: bracket.rate,
                });
            }
        }

        // First-match-wins only yields highest-threshold-met with a strictly
        // descending table.
        let descending = brackets
            .windows(2)
            .all(|pair| pair[0].age_threshold > pair[1].age_threshold);
        if !descending {
            return Err(CatalogError::UnorderedDiscountBrackets {
                plan: plan.to_string(),
            });
        }

        // Without a 0-age bracket, low ages would silently fall through to
        // rate 0.
        match brackets.last() {
            Some(bracket) if bracket.age_threshold == 0 => Ok(()),
            _ => Err(CatalogError::MissingZeroAgeBracket {
                plan: plan.to_string(),
            }),
        }
    }
}
