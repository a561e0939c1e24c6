//! Raw price-entry form state, as posted by the editor.
//!
//! Money stays a string until validation has checked its precision, and
//! integer inputs are signed so negative input is reported by validation
//! instead of failing deserialization.

use super::cadence::Cadence;
use super::matrix::{DimensionValue, MatrixCombination};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// One committed-capacity threshold row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdForm {
    #[validate(custom(function = "crate::services::validation::rate_amount"))]
    pub rate: String,
    #[validate(range(min = 0, message = "Must not be negative"))]
    pub included: i64,
    #[validate(custom(function = "crate::services::validation::usage_price"))]
    pub overage_rate: String,
}

/// One tier row. `first_unit` accepts either a JSON string or number.
///
/// Row-local rules only; boundary ordering across rows is checked by the
/// tier schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TierRowForm {
    #[serde(deserialize_with = "string_or_number")]
    #[validate(custom(function = "crate::services::validation::first_unit"))]
    pub first_unit: String,
    #[validate(custom(function = "crate::services::validation::usage_price"))]
    pub unit_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::services::validation::optional_rate_amount"))]
    pub flat_fee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::services::validation::optional_rate_amount"))]
    pub flat_cap: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRowForm {
    #[validate(custom(function = "crate::services::validation::usage_price"))]
    pub per_unit_price: String,
    #[validate(nested)]
    pub dimension1: DimensionValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub dimension2: Option<DimensionValue>,
}

impl MatrixRowForm {
    pub fn combination(&self) -> MatrixCombination {
        MatrixCombination {
            dimension1: self.dimension1.clone(),
            dimension2: self.dimension2.clone(),
        }
    }
}

/// Flat form field set covering every pricing shape. Which fields apply is
/// decided by the pricing type; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<Cadence>,

    // rate, capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,

    // slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_slots: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slots: Option<i64>,

    // capacity
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thresholds: Vec<ThresholdForm>,

    // perUnit, extraRecurring, oneTime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    // tiered, volume
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiers: Vec<TierRowForm>,

    // package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_size: Option<i64>,

    // matrix
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matrix_rows: Vec<MatrixRowForm>,
}

impl FormFields {
    pub fn with_term(mut self, term: Cadence) -> Self {
        self.term = Some(term);
        self
    }
}

/// Treats blank optional strings as absent.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
