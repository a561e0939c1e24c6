//! Integration tests for form ⇄ wire conversion.

mod common;

use common::sample_fields;
use pricing_service::error::PricingError;
use pricing_service::models::{PricingPayload, PricingType};
use pricing_service::services::{from_wire_pricing, from_wire_value, to_wire_pricing};

#[test]
fn test_round_trip_for_every_pricing_type() {
    for pricing_type in PricingType::ALL {
        let fields = sample_fields(pricing_type);
        let payload = to_wire_pricing(pricing_type, &fields).unwrap();
        assert_eq!(payload.pricing_type(), pricing_type);

        let (restored_type, restored) = from_wire_pricing(&payload).unwrap();
        assert_eq!(restored_type, pricing_type);
        assert_eq!(restored, fields, "round trip changed {} form", pricing_type);
    }
}

#[test]
fn test_payload_kind_matches_wire_kind() {
    for pricing_type in PricingType::ALL {
        let payload = to_wire_pricing(pricing_type, &sample_fields(pricing_type)).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], pricing_type.wire_kind());
    }
}

#[test]
fn test_decimal_scale_survives_json() {
    let payload = to_wire_pricing(PricingType::PerUnit, &sample_fields(PricingType::PerUnit))
        .unwrap();
    let json = serde_json::to_string(&payload).unwrap();
    let decoded: PricingPayload = serde_json::from_str(&json).unwrap();

    let (_, fields) = from_wire_pricing(&decoded).unwrap();
    assert_eq!(fields.unit_price.as_deref(), Some("0.00012345"));
}

#[test]
fn test_from_wire_value_decodes_known_kind() {
    let (pricing_type, fields) = from_wire_value(&serde_json::json!({
        "kind": "usage_package",
        "packagePrice": "25.50",
        "blockSize": 100
    }))
    .unwrap();

    assert_eq!(pricing_type, PricingType::Package);
    assert_eq!(fields.package_price.as_deref(), Some("25.50"));
    assert_eq!(fields.block_size, Some(100));
}

#[test]
fn test_unknown_kind_is_reported() {
    let err = from_wire_value(&serde_json::json!({ "kind": "usage_bogus" })).unwrap_err();
    assert!(matches!(err, PricingError::UnknownShape(ref kind) if kind == "usage_bogus"));

    let err = from_wire_value(&serde_json::json!({ "rate": "1.00" })).unwrap_err();
    assert!(matches!(err, PricingError::UnknownShape(_)));
}

#[test]
fn test_known_kind_with_bad_body_is_malformed() {
    let err = from_wire_value(&serde_json::json!({
        "kind": "usage_package",
        "packagePrice": "25.50",
        "blockSize": -1
    }))
    .unwrap_err();

    assert!(matches!(err, PricingError::MalformedPayload(_)));
}
