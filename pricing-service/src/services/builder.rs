//! Price-input builder and its inverse.

use crate::error::{PricingError, PricingResult};
use crate::models::{
    Cadence, ComponentStructure, FormFields, PriceInput, PricingPayload, PricingType,
};
use crate::services::mapper::{capacity_threshold_to_wire, from_wire_pricing, to_wire_pricing};
use crate::services::validation::{
    normalize_currency, price_entry_errors, structure_errors, ValidationFailure,
};
use serde::{Deserialize, Serialize};

/// Expand a validated form into the price entries the billing backend stores.
///
/// Capacity yields one entry per threshold, in threshold order. One-time
/// charges are always stored as `MONTHLY`, whatever `term` says. Every other
/// shape yields exactly one entry at `term`.
pub fn build_price_inputs(
    pricing_type: PricingType,
    fields: &FormFields,
    currency: &str,
) -> PricingResult<Vec<PriceInput>> {
    let entry = |cadence: Cadence, pricing: PricingPayload| PriceInput {
        cadence,
        currency: currency.to_string(),
        pricing,
    };

    let inputs = match pricing_type {
        PricingType::Capacity => {
            let cadence = fields.term.ok_or(PricingError::MissingField("term"))?;
            if fields.thresholds.is_empty() {
                return Err(PricingError::MissingField("thresholds"));
            }
            fields
                .thresholds
                .iter()
                .map(|row| capacity_threshold_to_wire(row).map(|p| entry(cadence, p)))
                .collect::<PricingResult<Vec<_>>>()?
        }
        PricingType::OneTime => {
            vec![entry(Cadence::Monthly, to_wire_pricing(pricing_type, fields)?)]
        }
        _ => {
            let cadence = fields.term.ok_or(PricingError::MissingField("term"))?;
            vec![entry(cadence, to_wire_pricing(pricing_type, fields)?)]
        }
    };

    tracing::debug!(
        pricing_type = %pricing_type,
        currency = %currency,
        entries = inputs.len(),
        "Built price inputs"
    );

    Ok(inputs)
}

/// Form state recovered from a stored price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoredForm {
    pub pricing_type: PricingType,
    pub currency: String,
    pub fields: FormFields,
}

/// Inverse of [`build_price_inputs`]: regroup a component's price list into
/// one editable form.
pub fn restore_form(prices: &[PriceInput]) -> PricingResult<RestoredForm> {
    let first = prices.first().ok_or(PricingError::EmptyPriceList)?;
    let pricing_type = first.pricing.pricing_type();

    for price in &prices[1..] {
        if price.pricing.pricing_type() != pricing_type {
            return Err(PricingError::InconsistentPriceList(format!(
                "pricing types {} and {}",
                pricing_type,
                price.pricing.pricing_type()
            )));
        }
        if price.cadence != first.cadence {
            return Err(PricingError::InconsistentPriceList(format!(
                "cadences {} and {}",
                first.cadence, price.cadence
            )));
        }
        if price.currency != first.currency {
            return Err(PricingError::InconsistentPriceList(format!(
                "currencies {} and {}",
                first.currency, price.currency
            )));
        }
    }

    let mut fields = if pricing_type == PricingType::Capacity {
        let mut fields = FormFields::default();
        for price in prices {
            let (_, restored) = from_wire_pricing(&price.pricing)?;
            fields.thresholds.extend(restored.thresholds);
        }
        fields
    } else {
        if prices.len() > 1 {
            return Err(PricingError::InconsistentPriceList(format!(
                "{} entries for a single-entry {} component",
                prices.len(),
                pricing_type
            )));
        }
        from_wire_pricing(&first.pricing)?.1
    };

    if pricing_type.is_recurring() {
        fields.term = Some(first.cadence);
    }

    Ok(RestoredForm {
        pricing_type,
        currency: first.currency.clone(),
        fields,
    })
}

/// A component's structure together with its built price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceComponent {
    pub structure: ComponentStructure,
    pub pricing_type: PricingType,
    pub prices: Vec<PriceInput>,
}

/// Validate structure and form together, then build the price list.
///
/// Structure and field errors are reported in one [`PricingError::Validation`].
pub fn price_component(
    structure: ComponentStructure,
    fields: &FormFields,
    currency: &str,
) -> PricingResult<PriceComponent> {
    let pricing_type = structure.pricing_type();

    let mut errors = structure_errors(&structure);
    errors.extend(price_entry_errors(pricing_type, fields));
    ValidationFailure::check(errors)?;

    let currency = normalize_currency(currency)?;
    let prices = build_price_inputs(pricing_type, fields, &currency)?;

    Ok(PriceComponent {
        structure,
        pricing_type,
        prices,
    })
}
