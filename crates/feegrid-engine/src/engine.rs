//! Fee orchestration
//!
//! [`FeeEngine`] resolves the billing policy for a plan, computes the base
//! fee, and applies the plan's age-based discount when one is registered and
//! an age was supplied.

use crate::catalog::Catalog;
use crate::registry::PolicyRegistry;
use feegrid_common::{BillingError, ComputeError, FeeQuote, FeeRequest};
use rust_decimal::Decimal;
use tracing::{debug, error, instrument};

/// The billing orchestrator
///
/// Holds a registry built once at construction; every calculation is a pure
/// function of the request, so the engine can be shared across threads
/// without locking.
#[derive(Debug, Clone)]
pub struct FeeEngine {
    registry: PolicyRegistry,
}

impl FeeEngine {
    /// Create an engine over an already-built registry
    pub fn new(registry: PolicyRegistry) -> Self {
        Self { registry }
    }

    /// Create an engine over the built-in plan catalog
    pub fn with_builtin_catalog() -> Self {
        // The built-in catalog is covered by tests, so validation cannot
        // fail here.
        let registry = PolicyRegistry::from_catalog(&Catalog::builtin())
            .expect("built-in catalog must validate");
        Self::new(registry)
    }

    /// The registry this engine resolves plans against
    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Compute the final fee for a request
    ///
    /// Convenience wrapper over [`FeeEngine::quote`] for callers that only
    /// need the total.
    pub fn calculate_fee(&self, request: &FeeRequest) -> Result<Decimal, BillingError> {
        Ok(self.quote(request)?.total)
    }

    /// Compute an itemized fee quote for a request
    ///
    /// Fails with [`BillingError::UnknownPlan`] when the plan is not
    /// registered (a client fault). Any internal computation fault is logged
    /// with its cause and surfaced as the opaque [`BillingError::Internal`].
    #[instrument(skip(self, request), fields(plan = %request.plan_name))]
    pub fn quote(&self, request: &FeeRequest) -> Result<FeeQuote, BillingError> {
        let policy = match self.registry.policy(&request.plan_name) {
            Some(policy) => policy,
            None => {
                debug!(plan = %request.plan_name, "no billing policy registered");
                return Err(BillingError::UnknownPlan {
                    plan: request.plan_name.clone(),
                });
            }
        };

        let base_fee = policy
            .calculate_fee(request.usage, request.date)
            .map_err(|err| self.contain(&request.plan_name, err))?;

        let discount_rate = match (self.registry.discount(&request.plan_name), request.age) {
            (Some(discount), Some(age)) => discount.discount_rate(age),
            _ => Decimal::ZERO,
        };

        let (discount_amount, total) = Self::apply_discount(base_fee, discount_rate)
            .map_err(|err| self.contain(&request.plan_name, err))?;

        debug!(%base_fee, %discount_rate, %total, "fee calculated");

        Ok(FeeQuote {
            plan_name: request.plan_name.clone(),
            base_fee,
            discount_rate,
            discount_amount,
            total,
            computed_at: chrono::Utc::now().timestamp_millis(),
        })
    }

    fn apply_discount(
        base_fee: Decimal,
        rate: Decimal,
    ) -> Result<(Decimal, Decimal), ComputeError> {
        let amount = base_fee.checked_mul(rate).ok_or(ComputeError::Overflow)?;
        let total = base_fee.checked_sub(amount).ok_or(ComputeError::Overflow)?;
        Ok((amount, total))
    }

    /// Record an internal fault, then surface the opaque error kind
    fn contain(&self, plan: &str, err: ComputeError) -> BillingError {
        error!(plan, %err, "fee computation failed");
        BillingError::Internal
    }
}

impl Default for FeeEngine {
    fn default() -> Self {
        Self::with_builtin_catalog()
    }
}
