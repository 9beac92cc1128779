//! Policy registry
//!
//! Built once from a validated catalog, read-only for the lifetime of the
//! engine. Concurrent lookups need no locking.

use crate::catalog::Catalog;
use crate::policy::{BillingPolicy, DiscountPolicy};
use feegrid_common::CatalogError;
use std::collections::HashMap;

/// Runtime lookup tables: plan name to billing policy, plan name to
/// discount policy. A plan has zero or one discount policy.
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    policies: HashMap<String, BillingPolicy>,
    discounts: HashMap<String, DiscountPolicy>,
}

impl PolicyRegistry {
    /// Validate the catalog and eagerly build every configured policy
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, CatalogError> {
        catalog.validate()?;

        let mut policies = HashMap::with_capacity(catalog.plans.len());
        let mut discounts = HashMap::new();

        for entry in &catalog.plans {
            policies.insert(entry.name.clone(), entry.spec.build());
            if let Some(discount) = &entry.discount {
                discounts.insert(entry.name.clone(), discount.build());
            }
        }

        Ok(Self {
            policies,
            discounts,
        })
    }

    /// Billing policy registered under the plan name
    pub fn policy(&self, plan: &str) -> Option<&BillingPolicy> {
        self.policies.get(plan)
    }

    /// Discount policy registered under the plan name
    pub fn discount(&self, plan: &str) -> Option<&DiscountPolicy> {
        self.discounts.get(plan)
    }

    /// Names of all registered plans
    pub fn plan_names(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }

    /// Number of registered plans
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
