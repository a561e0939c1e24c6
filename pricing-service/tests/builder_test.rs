//! Integration tests for price-input building and form restoration.

mod common;

use common::{monthly, sample_fields, threshold};
use pricing_service::error::PricingError;
use pricing_service::models::{
    BillingType, Cadence, ComponentStructure, FormFields, PricingPayload, PricingType,
};
use pricing_service::services::{build_price_inputs, price_component, restore_form};

#[test]
fn test_capacity_yields_one_entry_per_threshold() {
    let fields = FormFields {
        thresholds: vec![
            threshold("10.00", 1000, "0.01"),
            threshold("50.00", 10000, "0.005"),
        ],
        ..Default::default()
    }
    .with_term(Cadence::Monthly);

    let inputs = build_price_inputs(PricingType::Capacity, &fields, "USD").unwrap();
    assert_eq!(inputs.len(), 2);

    for input in &inputs {
        assert_eq!(input.cadence, Cadence::Monthly);
        assert_eq!(input.currency, "USD");
    }

    let included: Vec<u64> = inputs
        .iter()
        .map(|input| match &input.pricing {
            PricingPayload::Capacity(p) => p.included,
            other => panic!("unexpected payload {:?}", other),
        })
        .collect();
    assert_eq!(included, vec![1000, 10000]);
}

#[test]
fn test_one_time_is_always_monthly() {
    let fields = sample_fields(PricingType::OneTime).with_term(Cadence::Annual);

    let inputs = build_price_inputs(PricingType::OneTime, &fields, "EUR").unwrap();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].cadence, Cadence::Monthly);
    assert_eq!(inputs[0].currency, "EUR");
}

#[test]
fn test_restore_inverts_build_for_every_pricing_type() {
    for pricing_type in PricingType::ALL {
        let fields = sample_fields(pricing_type).with_term(Cadence::Quarterly);
        let inputs = build_price_inputs(pricing_type, &fields, "GBP").unwrap();

        let restored = restore_form(&inputs).unwrap();
        assert_eq!(restored.pricing_type, pricing_type);
        assert_eq!(restored.currency, "GBP");

        let expected = if pricing_type.is_recurring() {
            fields
        } else {
            FormFields {
                term: None,
                ..fields
            }
        };
        assert_eq!(restored.fields, expected, "{} did not restore", pricing_type);
    }
}

#[test]
fn test_restore_regroups_capacity_thresholds() {
    let fields = monthly(FormFields {
        thresholds: vec![
            threshold("10.00", 0, "0.01"),
            threshold("25.00", 500, "0.008"),
            threshold("40.00", 2000, "0.006"),
        ],
        ..Default::default()
    });

    let inputs = build_price_inputs(PricingType::Capacity, &fields, "USD").unwrap();
    let restored = restore_form(&inputs).unwrap();
    assert_eq!(restored.fields.thresholds, fields.thresholds);
}

#[test]
fn test_restore_empty_list_fails() {
    let err = restore_form(&[]).unwrap_err();
    assert!(matches!(err, PricingError::EmptyPriceList));
}

#[test]
fn test_price_component_collects_structure_and_field_errors() {
    let structure = ComponentStructure::Usage {
        metric_id: "".to_string(),
        usage_model: Some("package".to_string()),
    };

    let err = price_component(structure, &FormFields::default(), "USD").unwrap_err();
    let PricingError::Validation(failure) = err else {
        panic!("expected validation failure");
    };
    assert!(failure.has_path("metricId"));
    assert!(failure.has_path("term"));
    assert!(failure.has_path("packagePrice"));
}

#[test]
fn test_price_component_with_unknown_usage_model_prices_per_unit() {
    let structure: ComponentStructure = serde_json::from_value(serde_json::json!({
        "feeType": "usage",
        "metricId": "api_calls",
        "usageModel": "bogus"
    }))
    .unwrap();
    let fields = monthly(sample_fields(PricingType::PerUnit));

    let component = price_component(structure, &fields, "USD").unwrap();
    assert_eq!(component.pricing_type, PricingType::PerUnit);
    assert!(matches!(
        component.prices[0].pricing,
        PricingPayload::PerUnit(_)
    ));
}

#[test]
fn test_price_component_normalizes_currency() {
    let structure = ComponentStructure::ExtraRecurring {
        billing_type: BillingType::Arrear,
    };
    let fields = monthly(sample_fields(PricingType::ExtraRecurring));

    let component = price_component(structure, &fields, " eur ").unwrap();
    assert_eq!(component.pricing_type, PricingType::ExtraRecurring);
    assert_eq!(component.prices[0].currency, "EUR");
}

#[test]
fn test_price_component_rejects_bad_currency() {
    let fields = monthly(sample_fields(PricingType::Rate));

    let err = price_component(ComponentStructure::Rate, &fields, "dollars").unwrap_err();
    assert!(matches!(err, PricingError::InvalidCurrency(_)));
}
