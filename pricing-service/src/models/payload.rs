//! Wire pricing payloads and price inputs.
//!
//! Monetary values are [`Decimal`] and serialize as strings, so no binary
//! float ever crosses the boundary. Unit counts are unsigned integers.

use super::cadence::Cadence;
use super::matrix::{DimensionValue, MatrixCombination};
use super::pricing_type::PricingType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat recurring rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePricing {
    pub rate: Decimal,
}

/// Per-seat pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPricing {
    pub unit_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_slots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slots: Option<u32>,
}

/// One committed-capacity threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityPricing {
    pub rate: Decimal,
    pub included: u64,
    pub overage_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerUnitPricing {
    pub unit_price: Decimal,
}

/// One band of a tiered or volume schedule, bounded below by `first_unit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRow {
    pub first_unit: u64,
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_cap: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredPricing {
    pub rows: Vec<TierRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePricing {
    pub package_price: Decimal,
    pub block_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub per_unit_price: Decimal,
    pub dimension1: DimensionValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension2: Option<DimensionValue>,
}

impl MatrixRow {
    pub fn combination(&self) -> MatrixCombination {
        MatrixCombination {
            dimension1: self.dimension1.clone(),
            dimension2: self.dimension2.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixPricing {
    pub rows: Vec<MatrixRow>,
}

/// Unit price times quantity. Shared by extra-recurring and one-time charges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityPricing {
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Canonical pricing representation, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PricingPayload {
    #[serde(rename = "rate")]
    Rate(RatePricing),
    #[serde(rename = "slot")]
    Slot(SlotPricing),
    #[serde(rename = "capacity")]
    Capacity(CapacityPricing),
    #[serde(rename = "usage_perUnit")]
    PerUnit(PerUnitPricing),
    #[serde(rename = "usage_tiered")]
    Tiered(TieredPricing),
    #[serde(rename = "usage_volume")]
    Volume(TieredPricing),
    #[serde(rename = "usage_package")]
    Package(PackagePricing),
    #[serde(rename = "usage_matrix")]
    Matrix(MatrixPricing),
    #[serde(rename = "extraRecurring")]
    ExtraRecurring(QuantityPricing),
    #[serde(rename = "oneTime")]
    OneTime(QuantityPricing),
}

impl PricingPayload {
    pub fn pricing_type(&self) -> PricingType {
        match self {
            PricingPayload::Rate(_) => PricingType::Rate,
            PricingPayload::Slot(_) => PricingType::Slot,
            PricingPayload::Capacity(_) => PricingType::Capacity,
            PricingPayload::PerUnit(_) => PricingType::PerUnit,
            PricingPayload::Tiered(_) => PricingType::Tiered,
            PricingPayload::Volume(_) => PricingType::Volume,
            PricingPayload::Package(_) => PricingType::Package,
            PricingPayload::Matrix(_) => PricingType::Matrix,
            PricingPayload::ExtraRecurring(_) => PricingType::ExtraRecurring,
            PricingPayload::OneTime(_) => PricingType::OneTime,
        }
    }
}

/// The unit the billing backend stores: one pricing payload at a cadence and currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInput {
    pub cadence: Cadence,
    pub currency: String,
    pub pricing: PricingPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_payload_serializes_kind_and_decimal_strings() {
        let payload = PricingPayload::Capacity(CapacityPricing {
            rate: Decimal::from_str("10.00").unwrap(),
            included: 1000,
            overage_rate: Decimal::from_str("0.00500000").unwrap(),
        });

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "capacity",
                "rate": "10.00",
                "included": 1000,
                "overageRate": "0.00500000"
            })
        );
    }

    #[test]
    fn test_payload_deserializes_usage_kind() {
        let payload: PricingPayload = serde_json::from_value(serde_json::json!({
            "kind": "usage_package",
            "packagePrice": "25.5",
            "blockSize": 100
        }))
        .unwrap();

        assert_eq!(payload.pricing_type(), PricingType::Package);
    }

    #[test]
    fn test_optional_slot_bounds_are_omitted() {
        let payload = PricingPayload::Slot(SlotPricing {
            unit_rate: Decimal::from_str("12.50").unwrap(),
            min_slots: None,
            max_slots: Some(50),
        });

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("minSlots").is_none());
        assert_eq!(json["maxSlots"], 50);
    }
}
