//! Fee types, usage models and the pricing-shape discriminator.

use serde::{Deserialize, Serialize};

/// Coarse billing-model category shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeType {
    Rate,
    Slot,
    Capacity,
    Usage,
    ExtraRecurring,
    OneTime,
}

impl FeeType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rate" => Some(FeeType::Rate),
            "slot" => Some(FeeType::Slot),
            "capacity" => Some(FeeType::Capacity),
            "usage" => Some(FeeType::Usage),
            "extraRecurring" => Some(FeeType::ExtraRecurring),
            "oneTime" => Some(FeeType::OneTime),
            _ => None,
        }
    }
}

/// Secondary discriminator for usage fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageModel {
    PerUnit,
    Tiered,
    Volume,
    Package,
    Matrix,
}

impl UsageModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageModel::PerUnit => "per_unit",
            UsageModel::Tiered => "tiered",
            UsageModel::Volume => "volume",
            UsageModel::Package => "package",
            UsageModel::Matrix => "matrix",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "per_unit" => Some(UsageModel::PerUnit),
            "tiered" => Some(UsageModel::Tiered),
            "volume" => Some(UsageModel::Volume),
            "package" => Some(UsageModel::Package),
            "matrix" => Some(UsageModel::Matrix),
            _ => None,
        }
    }
}

/// Fine-grained pricing shape. Decides which form fields and wire payload apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PricingType {
    Rate,
    Slot,
    Capacity,
    PerUnit,
    Tiered,
    Volume,
    Package,
    Matrix,
    ExtraRecurring,
    OneTime,
}

impl PricingType {
    pub const ALL: [PricingType; 10] = [
        PricingType::Rate,
        PricingType::Slot,
        PricingType::Capacity,
        PricingType::PerUnit,
        PricingType::Tiered,
        PricingType::Volume,
        PricingType::Package,
        PricingType::Matrix,
        PricingType::ExtraRecurring,
        PricingType::OneTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingType::Rate => "rate",
            PricingType::Slot => "slot",
            PricingType::Capacity => "capacity",
            PricingType::PerUnit => "perUnit",
            PricingType::Tiered => "tiered",
            PricingType::Volume => "volume",
            PricingType::Package => "package",
            PricingType::Matrix => "matrix",
            PricingType::ExtraRecurring => "extraRecurring",
            PricingType::OneTime => "oneTime",
        }
    }

    pub fn fee_type(&self) -> FeeType {
        match self {
            PricingType::Rate => FeeType::Rate,
            PricingType::Slot => FeeType::Slot,
            PricingType::Capacity => FeeType::Capacity,
            PricingType::PerUnit
            | PricingType::Tiered
            | PricingType::Volume
            | PricingType::Package
            | PricingType::Matrix => FeeType::Usage,
            PricingType::ExtraRecurring => FeeType::ExtraRecurring,
            PricingType::OneTime => FeeType::OneTime,
        }
    }

    pub fn usage_model(&self) -> Option<UsageModel> {
        match self {
            PricingType::PerUnit => Some(UsageModel::PerUnit),
            PricingType::Tiered => Some(UsageModel::Tiered),
            PricingType::Volume => Some(UsageModel::Volume),
            PricingType::Package => Some(UsageModel::Package),
            PricingType::Matrix => Some(UsageModel::Matrix),
            _ => None,
        }
    }

    /// The `kind` discriminator used by the wire payload.
    pub fn wire_kind(&self) -> &'static str {
        match self {
            PricingType::Rate => "rate",
            PricingType::Slot => "slot",
            PricingType::Capacity => "capacity",
            PricingType::PerUnit => "usage_perUnit",
            PricingType::Tiered => "usage_tiered",
            PricingType::Volume => "usage_volume",
            PricingType::Package => "usage_package",
            PricingType::Matrix => "usage_matrix",
            PricingType::ExtraRecurring => "extraRecurring",
            PricingType::OneTime => "oneTime",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn from_wire_kind(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.wire_kind() == kind)
    }

    /// Shapes billed on a recurring cadence. One-time charges are not.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, PricingType::OneTime)
    }
}

impl From<UsageModel> for PricingType {
    fn from(model: UsageModel) -> Self {
        match model {
            UsageModel::PerUnit => PricingType::PerUnit,
            UsageModel::Tiered => PricingType::Tiered,
            UsageModel::Volume => PricingType::Volume,
            UsageModel::Package => PricingType::Package,
            UsageModel::Matrix => PricingType::Matrix,
        }
    }
}

impl std::fmt::Display for PricingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
