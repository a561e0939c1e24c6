//! Shared fixtures for pricing-service integration tests.

#![allow(dead_code)]

use pricing_service::models::{
    Cadence, DimensionValue, FormFields, MatrixRowForm, MetricDefinition, MetricDimension,
    PricingType, ThresholdForm, TierRowForm,
};

pub fn tier(first_unit: &str, unit_price: &str) -> TierRowForm {
    TierRowForm {
        first_unit: first_unit.to_string(),
        unit_price: unit_price.to_string(),
        flat_fee: None,
        flat_cap: None,
    }
}

pub fn threshold(rate: &str, included: i64, overage_rate: &str) -> ThresholdForm {
    ThresholdForm {
        rate: rate.to_string(),
        included,
        overage_rate: overage_rate.to_string(),
    }
}

pub fn region_row(region: &str, price: &str) -> MatrixRowForm {
    MatrixRowForm {
        per_unit_price: price.to_string(),
        dimension1: DimensionValue::new("region", region),
        dimension2: None,
    }
}

pub fn region_metric(metric_id: &str, regions: &[&str]) -> MetricDefinition {
    MetricDefinition {
        metric_id: metric_id.to_string(),
        name: None,
        dimensions: vec![MetricDimension {
            key: "region".to_string(),
            values: regions.iter().map(|r| r.to_string()).collect(),
        }],
    }
}

/// A valid form for every pricing type, without a billing term.
pub fn sample_fields(pricing_type: PricingType) -> FormFields {
    match pricing_type {
        PricingType::Rate => FormFields {
            rate: Some("99.00".to_string()),
            ..Default::default()
        },
        PricingType::Slot => FormFields {
            unit_rate: Some("12.50".to_string()),
            min_slots: Some(1),
            max_slots: Some(25),
            ..Default::default()
        },
        PricingType::Capacity => FormFields {
            thresholds: vec![threshold("10.00", 1000, "0.005")],
            ..Default::default()
        },
        PricingType::PerUnit => FormFields {
            unit_price: Some("0.00012345".to_string()),
            ..Default::default()
        },
        PricingType::Tiered | PricingType::Volume => FormFields {
            tiers: vec![
                tier("0", "0.10"),
                TierRowForm {
                    flat_fee: Some("5.00".to_string()),
                    ..tier("1000", "0.08")
                },
            ],
            ..Default::default()
        },
        PricingType::Package => FormFields {
            package_price: Some("25.50".to_string()),
            block_size: Some(100),
            ..Default::default()
        },
        PricingType::Matrix => FormFields {
            matrix_rows: vec![
                MatrixRowForm {
                    per_unit_price: "0.002".to_string(),
                    dimension1: DimensionValue::new("region", "us"),
                    dimension2: Some(DimensionValue::new("tier", "gold")),
                },
                region_row("eu", "0.003"),
            ],
            ..Default::default()
        },
        PricingType::ExtraRecurring => FormFields {
            unit_price: Some("4.99".to_string()),
            quantity: Some(3),
            ..Default::default()
        },
        PricingType::OneTime => FormFields {
            unit_price: Some("150.00".to_string()),
            quantity: Some(1),
            ..Default::default()
        },
    }
}

pub fn monthly(fields: FormFields) -> FormFields {
    fields.with_term(Cadence::Monthly)
}
