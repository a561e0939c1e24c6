//! Product-definition attributes of a price component.
//!
//! These are fixed when the product is defined and read-only while prices
//! are entered, but they are needed to interpret the prices.

use super::pricing_type::{FeeType, PricingType};
use crate::services::resolver::resolve_pricing_type;
use serde::{Deserialize, Serialize};

/// When extra-recurring charges are billed relative to their period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingType {
    #[default]
    Advance,
    Arrear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "feeType", rename_all = "camelCase")]
pub enum ComponentStructure {
    Rate,
    Slot {
        #[serde(rename = "unitName")]
        unit_name: String,
    },
    Capacity {
        #[serde(rename = "metricId")]
        metric_id: String,
    },
    /// `usage_model` is kept as sent. An absent or unknown model resolves
    /// to per-unit pricing rather than rejecting the structure.
    Usage {
        #[serde(rename = "metricId")]
        metric_id: String,
        #[serde(rename = "usageModel", default, skip_serializing_if = "Option::is_none")]
        usage_model: Option<String>,
    },
    ExtraRecurring {
        #[serde(rename = "billingType", default)]
        billing_type: BillingType,
    },
    OneTime,
}

impl ComponentStructure {
    pub fn fee_type(&self) -> FeeType {
        match self {
            ComponentStructure::Rate => FeeType::Rate,
            ComponentStructure::Slot { .. } => FeeType::Slot,
            ComponentStructure::Capacity { .. } => FeeType::Capacity,
            ComponentStructure::Usage { .. } => FeeType::Usage,
            ComponentStructure::ExtraRecurring { .. } => FeeType::ExtraRecurring,
            ComponentStructure::OneTime => FeeType::OneTime,
        }
    }

    pub fn pricing_type(&self) -> PricingType {
        match self {
            ComponentStructure::Usage { usage_model, .. } => {
                resolve_pricing_type(FeeType::Usage, usage_model.as_deref())
            }
            ComponentStructure::Rate => PricingType::Rate,
            ComponentStructure::Slot { .. } => PricingType::Slot,
            ComponentStructure::Capacity { .. } => PricingType::Capacity,
            ComponentStructure::ExtraRecurring { .. } => PricingType::ExtraRecurring,
            ComponentStructure::OneTime => PricingType::OneTime,
        }
    }

    /// Billable metric driving quantity, for capacity and usage components.
    pub fn metric_id(&self) -> Option<&str> {
        match self {
            ComponentStructure::Capacity { metric_id }
            | ComponentStructure::Usage { metric_id, .. } => Some(metric_id),
            _ => None,
        }
    }
}
