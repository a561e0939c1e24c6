//! Fee-type to pricing-type resolution.

use crate::models::{FeeType, PricingType, UsageModel};

/// Resolve the pricing shape for a fee type and an optional usage sub-model.
///
/// Only `usage` looks at `usage_model`. An absent or unrecognised model falls
/// back to per-unit pricing instead of failing.
pub fn resolve_pricing_type(fee_type: FeeType, usage_model: Option<&str>) -> PricingType {
    match fee_type {
        FeeType::Rate => PricingType::Rate,
        FeeType::Slot => PricingType::Slot,
        FeeType::Capacity => PricingType::Capacity,
        FeeType::ExtraRecurring => PricingType::ExtraRecurring,
        FeeType::OneTime => PricingType::OneTime,
        FeeType::Usage => match usage_model.and_then(UsageModel::parse) {
            Some(model) => PricingType::from(model),
            None => {
                tracing::debug!(
                    usage_model = ?usage_model,
                    "Unrecognized usage model, defaulting to per-unit pricing"
                );
                PricingType::PerUnit
            }
        },
    }
}
