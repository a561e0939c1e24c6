//! Form ⇄ wire pricing conversion.
//!
//! `to_wire_pricing` expects input that already passed the shape's schema
//! (see [`crate::services::validation`]); it still reports bad input as an
//! error rather than panicking.

use crate::error::{PricingError, PricingResult};
use crate::models::{
    non_blank, CapacityPricing, FormFields, MatrixPricing, MatrixRow, MatrixRowForm,
    PackagePricing, PerUnitPricing, PriceInput, PricingPayload, PricingType, QuantityPricing, RatePricing,
    SlotPricing, ThresholdForm, TierRow, TierRowForm, TieredPricing,
};
use crate::services::validation::{parse_plain_decimal, parse_whole};
use rust_decimal::Decimal;

// Helper functions for type conversions

fn parse_decimal(field: &'static str, value: &str) -> PricingResult<Decimal> {
    parse_plain_decimal(value).ok_or_else(|| PricingError::InvalidDecimal {
        field,
        value: value.to_string(),
    })
}

fn required_decimal(field: &'static str, value: &Option<String>) -> PricingResult<Decimal> {
    let value = non_blank(value).ok_or(PricingError::MissingField(field))?;
    parse_decimal(field, value)
}

fn optional_decimal(field: &'static str, value: &Option<String>) -> PricingResult<Option<Decimal>> {
    non_blank(value)
        .map(|v| parse_decimal(field, v))
        .transpose()
}

fn to_unsigned<T: TryFrom<i64>>(field: &'static str, value: i64) -> PricingResult<T> {
    T::try_from(value).map_err(|_| PricingError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn to_signed<T>(field: &'static str, value: T) -> PricingResult<i64>
where
    T: Copy + ToString,
    i64: TryFrom<T>,
{
    i64::try_from(value).map_err(|_| PricingError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn required_int(field: &'static str, value: Option<i64>) -> PricingResult<i64> {
    value.ok_or(PricingError::MissingField(field))
}

fn threshold_to_wire(row: &ThresholdForm) -> PricingResult<CapacityPricing> {
    Ok(CapacityPricing {
        rate: parse_decimal("rate", &row.rate)?,
        included: to_unsigned("included", row.included)?,
        overage_rate: parse_decimal("overageRate", &row.overage_rate)?,
    })
}

fn tier_to_wire(row: &TierRowForm) -> PricingResult<TierRow> {
    let first_unit = parse_whole(&row.first_unit).ok_or_else(|| PricingError::InvalidInteger {
        field: "firstUnit",
        value: row.first_unit.clone(),
    })?;

    Ok(TierRow {
        first_unit,
        unit_price: parse_decimal("unitPrice", &row.unit_price)?,
        flat_fee: optional_decimal("flatFee", &row.flat_fee)?,
        flat_cap: optional_decimal("flatCap", &row.flat_cap)?,
    })
}

fn matrix_row_to_wire(row: &MatrixRowForm) -> PricingResult<MatrixRow> {
    Ok(MatrixRow {
        per_unit_price: parse_decimal("perUnitPrice", &row.per_unit_price)?,
        dimension1: row.dimension1.clone(),
        dimension2: row.dimension2.clone(),
    })
}

fn tiers_to_wire(fields: &FormFields) -> PricingResult<TieredPricing> {
    Ok(TieredPricing {
        rows: fields
            .tiers
            .iter()
            .map(tier_to_wire)
            .collect::<PricingResult<Vec<_>>>()?,
    })
}

fn quantity_to_wire(fields: &FormFields) -> PricingResult<QuantityPricing> {
    Ok(QuantityPricing {
        unit_price: required_decimal("unitPrice", &fields.unit_price)?,
        quantity: to_unsigned("quantity", required_int("quantity", fields.quantity)?)?,
    })
}

/// Converts one committed-capacity threshold row into its wire payload.
pub fn capacity_threshold_to_wire(row: &ThresholdForm) -> PricingResult<PricingPayload> {
    threshold_to_wire(row).map(PricingPayload::Capacity)
}

/// Build the canonical payload for `pricing_type` from form fields.
///
/// Fields that do not belong to the shape are ignored. A capacity payload
/// describes exactly one threshold; use the price-input builder for
/// multi-threshold forms.
pub fn to_wire_pricing(
    pricing_type: PricingType,
    fields: &FormFields,
) -> PricingResult<PricingPayload> {
    let payload = match pricing_type {
        PricingType::Rate => PricingPayload::Rate(RatePricing {
            rate: required_decimal("rate", &fields.rate)?,
        }),
        PricingType::Slot => PricingPayload::Slot(SlotPricing {
            unit_rate: required_decimal("unitRate", &fields.unit_rate)?,
            min_slots: fields
                .min_slots
                .map(|v| to_unsigned("minSlots", v))
                .transpose()?,
            max_slots: fields
                .max_slots
                .map(|v| to_unsigned("maxSlots", v))
                .transpose()?,
        }),
        PricingType::Capacity => match fields.thresholds.as_slice() {
            [row] => PricingPayload::Capacity(threshold_to_wire(row)?),
            rows => return Err(PricingError::ThresholdCount(rows.len())),
        },
        PricingType::PerUnit => PricingPayload::PerUnit(PerUnitPricing {
            unit_price: required_decimal("unitPrice", &fields.unit_price)?,
        }),
        PricingType::Tiered => PricingPayload::Tiered(tiers_to_wire(fields)?),
        PricingType::Volume => PricingPayload::Volume(tiers_to_wire(fields)?),
        PricingType::Package => PricingPayload::Package(PackagePricing {
            package_price: required_decimal("packagePrice", &fields.package_price)?,
            block_size: to_unsigned("blockSize", required_int("blockSize", fields.block_size)?)?,
        }),
        PricingType::Matrix => PricingPayload::Matrix(MatrixPricing {
            rows: fields
                .matrix_rows
                .iter()
                .map(matrix_row_to_wire)
                .collect::<PricingResult<Vec<_>>>()?,
        }),
        PricingType::ExtraRecurring => PricingPayload::ExtraRecurring(quantity_to_wire(fields)?),
        PricingType::OneTime => PricingPayload::OneTime(quantity_to_wire(fields)?),
    };

    Ok(payload)
}

fn tiers_from_wire(pricing: &TieredPricing) -> Vec<TierRowForm> {
    pricing
        .rows
        .iter()
        .map(|row| TierRowForm {
            first_unit: row.first_unit.to_string(),
            unit_price: row.unit_price.to_string(),
            flat_fee: row.flat_fee.map(|d| d.to_string()),
            flat_cap: row.flat_cap.map(|d| d.to_string()),
        })
        .collect()
}

fn quantity_from_wire(pricing: &QuantityPricing) -> FormFields {
    FormFields {
        unit_price: Some(pricing.unit_price.to_string()),
        quantity: Some(i64::from(pricing.quantity)),
        ..Default::default()
    }
}

/// Inverse of [`to_wire_pricing`], used to populate an edit form from a stored price.
///
/// The returned fields carry no `term`; cadence lives on the price input.
pub fn from_wire_pricing(payload: &PricingPayload) -> PricingResult<(PricingType, FormFields)> {
    let fields = match payload {
        PricingPayload::Rate(p) => FormFields {
            rate: Some(p.rate.to_string()),
            ..Default::default()
        },
        PricingPayload::Slot(p) => FormFields {
            unit_rate: Some(p.unit_rate.to_string()),
            min_slots: p.min_slots.map(i64::from),
            max_slots: p.max_slots.map(i64::from),
            ..Default::default()
        },
        PricingPayload::Capacity(p) => FormFields {
            thresholds: vec![ThresholdForm {
                rate: p.rate.to_string(),
                included: to_signed("included", p.included)?,
                overage_rate: p.overage_rate.to_string(),
            }],
            ..Default::default()
        },
        PricingPayload::PerUnit(p) => FormFields {
            unit_price: Some(p.unit_price.to_string()),
            ..Default::default()
        },
        PricingPayload::Tiered(p) | PricingPayload::Volume(p) => FormFields {
            tiers: tiers_from_wire(p),
            ..Default::default()
        },
        PricingPayload::Package(p) => FormFields {
            package_price: Some(p.package_price.to_string()),
            block_size: Some(to_signed("blockSize", p.block_size)?),
            ..Default::default()
        },
        PricingPayload::Matrix(p) => FormFields {
            matrix_rows: p
                .rows
                .iter()
                .map(|row| MatrixRowForm {
                    per_unit_price: row.per_unit_price.to_string(),
                    dimension1: row.dimension1.clone(),
                    dimension2: row.dimension2.clone(),
                })
                .collect(),
            ..Default::default()
        },
        PricingPayload::ExtraRecurring(p) | PricingPayload::OneTime(p) => quantity_from_wire(p),
    };

    Ok((payload.pricing_type(), fields))
}

fn check_kind(value: &serde_json::Value) -> PricingResult<PricingType> {
    let kind = value
        .get("kind")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| PricingError::UnknownShape("<missing kind>".to_string()))?;

    PricingType::from_wire_kind(kind).ok_or_else(|| PricingError::UnknownShape(kind.to_string()))
}

/// Decode an untyped wire payload.
///
/// An absent or unrecognised `kind` is an [`PricingError::UnknownShape`]: it
/// means producer and consumer disagree on the schema. A known kind with a
/// body that does not fit is [`PricingError::MalformedPayload`].
pub fn from_wire_value(value: &serde_json::Value) -> PricingResult<(PricingType, FormFields)> {
    check_kind(value)?;

    let payload: PricingPayload = serde_json::from_value(value.clone())
        .map_err(|e| PricingError::MalformedPayload(e.to_string()))?;

    from_wire_pricing(&payload)
}

/// Decode a stored price input, with the same unknown-shape handling as [`from_wire_value`].
pub fn price_input_from_value(value: &serde_json::Value) -> PricingResult<PriceInput> {
    let pricing = value
        .get("pricing")
        .ok_or(PricingError::MissingField("pricing"))?;
    check_kind(pricing)?;

    serde_json::from_value(value.clone()).map_err(|e| PricingError::MalformedPayload(e.to_string()))
}

/// Decode a JSON array of stored price inputs.
pub fn price_inputs_from_value(value: &serde_json::Value) -> PricingResult<Vec<PriceInput>> {
    value
        .as_array()
        .ok_or_else(|| {
            PricingError::MalformedPayload("expected an array of price inputs".to_string())
        })?
        .iter()
        .map(price_input_from_value)
        .collect()
}
