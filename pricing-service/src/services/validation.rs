//! Per-shape validation of raw price-entry forms.
//!
//! Rules never stop at the first failure. Field rules are declared with
//! `#[derive(Validate)]` and their [`ValidationErrors`] are flattened into
//! path-scoped [`FieldError`]s (for example `tiers[1].firstUnit`). Rules that
//! compare rows with each other are checked here and appended after them, so
//! a form can show every problem at once.

use crate::error::PricingError;
use crate::models::{
    Cadence, ComponentStructure, FormFields, MatrixRowForm, PricingType, ThresholdForm,
    TierRowForm,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Fractional digits allowed for rates, fees and fixed charges.
pub const RATE_PRECISION: usize = 2;

/// Fractional digits allowed for metered unit prices.
pub const USAGE_PRICE_PRECISION: usize = 8;

/// A single failed rule, scoped to the form field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, error: &ValidationError) -> Self {
        Self {
            path: path.into(),
            code: error.code.to_string(),
            message: error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string()),
        }
    }
}

/// Every field error found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn has_path(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.path.as_str()).collect()
    }

    pub(crate) fn check(errors: Vec<FieldError>) -> Result<(), ValidationFailure> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { errors })
        }
    }
}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            errors: flatten_errors(&errors),
        }
    }
}

/// Flattens nested derive output into dotted, indexed field paths.
///
/// Fields are visited in name order and list rows in index order, so the
/// result is stable across runs.
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    flatten_into(&mut out, None, errors);
    out
}

fn flatten_into(out: &mut Vec<FieldError>, prefix: Option<&str>, errors: &ValidationErrors) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by_key(|(field, _)| **field);

    for (field, kind) in fields {
        let name = camel_case(field);
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, name),
            None => name,
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|error| FieldError::new(path.as_str(), error)))
            }
            ValidationErrorsKind::Struct(inner) => flatten_into(out, Some(&path), inner),
            ValidationErrorsKind::List(rows) => {
                for (index, inner) in rows {
                    flatten_into(out, Some(&format!("{}[{}]", path, index)), inner);
                }
            }
        }
    }
}

/// `overage_rate` -> `overageRate`. Names already in camelCase pass through.
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn rule_failed(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn required() -> ValidationError {
    rule_failed("required", "Required")
}

// ============================================================================
// Field rules
// ============================================================================

/// True when `value` has at most `precision` digits after the decimal point.
///
/// Purely textual: the value is split on `.` and the fractional part is
/// measured, so no float rounding is involved.
pub fn is_precise(value: &str, precision: usize) -> bool {
    match value.trim().split_once('.') {
        Some((_, fraction)) => fraction.len() <= precision,
        None => true,
    }
}

/// Digits with an optional `.` and fractional digits, and nothing else.
///
/// Exponents, digit separators, a leading `+` and a bare `.5` or `5.` are
/// refused, so the textual precision check always sees every digit.
pub fn is_plain_decimal(value: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match value.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(value),
    }
}

/// Parses a plain, optionally negative decimal. `None` for anything else.
pub(crate) fn parse_plain_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if !is_plain_decimal(unsigned) {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// Parses a whole, non-negative unit count written with digits only.
pub(crate) fn parse_whole(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// A monetary value: a finite, non-negative decimal within `precision`.
pub fn validate_decimal(value: &str, precision: usize) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(required());
    }
    let parsed = parse_plain_decimal(trimmed)
        .ok_or_else(|| rule_failed("invalid_decimal", "Must be a number"))?;
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(rule_failed("negative", "Must not be negative"));
    }
    if !is_precise(trimmed, precision) {
        return Err(rule_failed(
            "precision",
            format!("Must have at most {} decimal places", precision),
        ));
    }
    Ok(())
}

pub fn rate_amount(value: &str) -> Result<(), ValidationError> {
    validate_decimal(value, RATE_PRECISION)
}

pub fn usage_price(value: &str) -> Result<(), ValidationError> {
    validate_decimal(value, USAGE_PRICE_PRECISION)
}

/// Blank optional fees count as absent.
pub fn optional_rate_amount(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    rate_amount(value)
}

/// Tier boundaries are whole unit counts, never fractional.
pub fn first_unit(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(required());
    }
    parse_whole(value)
        .map(|_| ())
        .ok_or_else(|| rule_failed("non_negative_integer", "Must be a non-negative whole number"))
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(required());
    }
    Ok(())
}

/// Three-letter ISO 4217 style code, returned upper-cased.
pub fn normalize_currency(code: &str) -> Result<String, PricingError> {
    let trimmed = code.trim();
    if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(PricingError::InvalidCurrency(code.to_string()))
    }
}

/// Runs the derived field rules of one shape view.
fn field_rules<T: Validate>(view: T) -> Vec<FieldError> {
    match view.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => flatten_errors(&errors),
    }
}

// ============================================================================
// Shape views
// ============================================================================

#[derive(Validate)]
struct RateFields {
    #[validate(required(message = "Required"), custom(function = "rate_amount"))]
    rate: Option<String>,
}

#[derive(Validate)]
struct SlotFields {
    #[validate(required(message = "Required"), custom(function = "rate_amount"))]
    unit_rate: Option<String>,
    #[validate(range(min = 1, max = 4294967295i64, message = "Must be a whole number from 1 to 4294967295"))]
    min_slots: Option<i64>,
    #[validate(range(min = 1, max = 4294967295i64, message = "Must be a whole number from 1 to 4294967295"))]
    max_slots: Option<i64>,
}

#[derive(Validate)]
struct CapacityFields {
    #[validate(nested)]
    thresholds: Vec<ThresholdForm>,
}

#[derive(Validate)]
struct PerUnitFields {
    #[validate(required(message = "Required"), custom(function = "usage_price"))]
    unit_price: Option<String>,
}

#[derive(Validate)]
struct TierFields {
    #[validate(nested)]
    tiers: Vec<TierRowForm>,
}

#[derive(Validate)]
struct PackageFields {
    #[validate(required(message = "Required"), custom(function = "usage_price"))]
    package_price: Option<String>,
    #[validate(required(message = "Required"), range(min = 1, message = "Must be at least 1"))]
    block_size: Option<i64>,
}

#[derive(Validate)]
struct MatrixFields {
    #[validate(nested)]
    matrix_rows: Vec<MatrixRowForm>,
}

#[derive(Validate)]
struct QuantityFields {
    #[validate(required(message = "Required"), custom(function = "rate_amount"))]
    unit_price: Option<String>,
    #[validate(
        required(message = "Required"),
        range(min = 1, max = 4294967295i64, message = "Must be a whole number from 1 to 4294967295")
    )]
    quantity: Option<i64>,
}

// ============================================================================
// Schemas
// ============================================================================

/// Validation rules for one pricing shape.
///
/// Row counts are checked by hand rather than with `length` next to
/// `nested`: validator cannot hold a field error and row errors under the
/// same key.
pub trait PricingSchema: Send + Sync {
    fn pricing_type(&self) -> PricingType;

    fn validate(&self, fields: &FormFields) -> Vec<FieldError>;

    /// Initial form state for a new entry of this shape.
    fn defaults(&self) -> FormFields {
        base_defaults(self.pricing_type())
    }
}

/// Recurring shapes start on a monthly term. One-time charges have none.
fn base_defaults(pricing_type: PricingType) -> FormFields {
    FormFields {
        term: pricing_type.is_recurring().then_some(Cadence::Monthly),
        ..Default::default()
    }
}

fn in_quantity_range(value: Option<i64>) -> bool {
    value.map_or(true, |v| (1..=i64::from(u32::MAX)).contains(&v))
}

struct RateSchema;

impl PricingSchema for RateSchema {
    fn pricing_type(&self) -> PricingType {
        PricingType::Rate
    }

    fn validate(&self, fields: &FormFields) -> Vec<FieldError> {
        field_rules(RateFields {
            rate: fields.rate.clone(),
        })
    }
}

struct SlotSchema;

impl PricingSchema for SlotSchema {
    fn pricing_type(&self) -> PricingType {
        PricingType::Slot
    }

    fn validate(&self, fields: &FormFields) -> Vec<FieldError> {
        let mut errors = field_rules(SlotFields {
            unit_rate: fields.unit_rate.clone(),
            min_slots: fields.min_slots,
            max_slots: fields.max_slots,
        });

        let bounds_valid = in_quantity_range(fields.min_slots) && in_quantity_range(fields.max_slots);
        if let (true, Some(min), Some(max)) = (bounds_valid, fields.min_slots, fields.max_slots) {
            if max < min {
                errors.push(FieldError::new(
                    "maxSlots",
                    &rule_failed("range", "Must be greater than or equal to minSlots"),
                ));
            }
        }
        errors
    }

    fn defaults(&self) -> FormFields {
        FormFields {
            min_slots: Some(1),
            ..base_defaults(PricingType::Slot)
        }
    }
}

struct CapacitySchema;

impl PricingSchema for CapacitySchema {
    fn pricing_type(&self) -> PricingType {
        PricingType::Capacity
    }

    fn validate(&self, fields: &FormFields) -> Vec<FieldError> {
        let mut errors = field_rules(CapacityFields {
            thresholds: fields.thresholds.clone(),
        });
        if fields.thresholds.is_empty() {
            errors.push(FieldError::new(
                "thresholds",
                &rule_failed("min_rows", "At least one threshold is required"),
            ));
        }
        errors
    }

    fn defaults(&self) -> FormFields {
        FormFields {
            thresholds: vec![ThresholdForm::default()],
            ..base_defaults(PricingType::Capacity)
        }
    }
}

struct PerUnitSchema;

impl PricingSchema for PerUnitSchema {
    fn pricing_type(&self) -> PricingType {
        PricingType::PerUnit
    }

    fn validate(&self, fields: &FormFields) -> Vec<FieldError> {
        field_rules(PerUnitFields {
            unit_price: fields.unit_price.clone(),
        })
    }
}

/// Tiered and volume schedules share their row rules.
struct TierSchema {
    pricing_type: PricingType,
}

impl PricingSchema for TierSchema {
    fn pricing_type(&self) -> PricingType {
        self.pricing_type
    }

    fn validate(&self, fields: &FormFields) -> Vec<FieldError> {
        let mut errors = field_rules(TierFields {
            tiers: fields.tiers.clone(),
        });
        if fields.tiers.len() < 2 {
            errors.push(FieldError::new(
                "tiers",
                &rule_failed("min_rows", "At least 2 tiers are required"),
            ));
        }

        // An unparseable boundary is already reported by its row and breaks
        // the chain instead of failing the next row too.
        let mut previous: Option<u64> = None;
        for (i, row) in fields.tiers.iter().enumerate() {
            let Some(first_unit) = parse_whole(&row.first_unit) else {
                previous = None;
                continue;
            };
            let path = format!("tiers[{}].firstUnit", i);
            if i == 0 && first_unit != 0 {
                errors.push(FieldError::new(
                    path.as_str(),
                    &rule_failed("first_tier_start", "The first tier must start at 0"),
                ));
            }
            if let Some(prev) = previous {
                if first_unit <= prev {
                    errors.push(FieldError::new(
                        path,
                        &rule_failed(
                            "ascending",
                            format!(
                                "Must be greater than the previous tier's first unit ({})",
                                prev
                            ),
                        ),
                    ));
                }
            }
            previous = Some(first_unit);
        }
        errors
    }

    /// Two rows, the first pinned to unit 0.
    fn defaults(&self) -> FormFields {
        FormFields {
            tiers: vec![
                TierRowForm {
                    first_unit: "0".to_string(),
                    ..Default::default()
                },
                TierRowForm::default(),
            ],
            ..base_defaults(self.pricing_type)
        }
    }
}

struct PackageSchema;

impl PricingSchema for PackageSchema {
    fn pricing_type(&self) -> PricingType {
        PricingType::Package
    }

    fn validate(&self, fields: &FormFields) -> Vec<FieldError> {
        field_rules(PackageFields {
            package_price: fields.package_price.clone(),
            block_size: fields.block_size,
        })
    }

    fn defaults(&self) -> FormFields {
        FormFields {
            block_size: Some(1),
            ..base_defaults(PricingType::Package)
        }
    }
}

struct MatrixSchema;

impl PricingSchema for MatrixSchema {
    fn pricing_type(&self) -> PricingType {
        PricingType::Matrix
    }

    fn validate(&self, fields: &FormFields) -> Vec<FieldError> {
        let mut errors = field_rules(MatrixFields {
            matrix_rows: fields.matrix_rows.clone(),
        });
        if fields.matrix_rows.is_empty() {
            errors.push(FieldError::new(
                "matrixRows",
                &rule_failed("min_rows", "At least one row is required"),
            ));
        }

        let mut seen = HashSet::new();
        for (i, row) in fields.matrix_rows.iter().enumerate() {
            let combination = row.combination();
            if !seen.insert(combination.clone()) {
                errors.push(FieldError::new(
                    format!("matrixRows[{}]", i),
                    &rule_failed(
                        "duplicate",
                        format!("Duplicate dimension combination ({})", combination),
                    ),
                ));
            }
        }
        errors
    }
}

/// Extra-recurring and one-time charges: unit price times quantity.
struct QuantitySchema {
    pricing_type: PricingType,
}

impl PricingSchema for QuantitySchema {
    fn pricing_type(&self) -> PricingType {
        self.pricing_type
    }

    fn validate(&self, fields: &FormFields) -> Vec<FieldError> {
        field_rules(QuantityFields {
            unit_price: fields.unit_price.clone(),
            quantity: fields.quantity,
        })
    }

    fn defaults(&self) -> FormFields {
        FormFields {
            quantity: Some(1),
            ..base_defaults(self.pricing_type)
        }
    }
}

static RATE: RateSchema = RateSchema;
static SLOT: SlotSchema = SlotSchema;
static CAPACITY: CapacitySchema = CapacitySchema;
static PER_UNIT: PerUnitSchema = PerUnitSchema;
static TIERED: TierSchema = TierSchema {
    pricing_type: PricingType::Tiered,
};
static VOLUME: TierSchema = TierSchema {
    pricing_type: PricingType::Volume,
};
static PACKAGE: PackageSchema = PackageSchema;
static MATRIX: MatrixSchema = MatrixSchema;
static EXTRA_RECURRING: QuantitySchema = QuantitySchema {
    pricing_type: PricingType::ExtraRecurring,
};
static ONE_TIME: QuantitySchema = QuantitySchema {
    pricing_type: PricingType::OneTime,
};

/// Schema lookup by pricing type.
pub fn schema_for(pricing_type: PricingType) -> &'static dyn PricingSchema {
    match pricing_type {
        PricingType::Rate => &RATE,
        PricingType::Slot => &SLOT,
        PricingType::Capacity => &CAPACITY,
        PricingType::PerUnit => &PER_UNIT,
        PricingType::Tiered => &TIERED,
        PricingType::Volume => &VOLUME,
        PricingType::Package => &PACKAGE,
        PricingType::Matrix => &MATRIX,
        PricingType::ExtraRecurring => &EXTRA_RECURRING,
        PricingType::OneTime => &ONE_TIME,
    }
}

/// Initial form state for a new price entry of `pricing_type`.
pub fn default_fields(pricing_type: PricingType) -> FormFields {
    schema_for(pricing_type).defaults()
}

/// Apply the shape rules for `pricing_type` to `fields`.
pub fn validate_pricing(
    pricing_type: PricingType,
    fields: &FormFields,
) -> Result<(), ValidationFailure> {
    ValidationFailure::check(schema_for(pricing_type).validate(fields))
}

/// Shape rules plus the billing term, which every recurring shape needs.
pub fn validate_price_entry(
    pricing_type: PricingType,
    fields: &FormFields,
) -> Result<(), ValidationFailure> {
    ValidationFailure::check(price_entry_errors(pricing_type, fields))
}

pub(crate) fn price_entry_errors(pricing_type: PricingType, fields: &FormFields) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if pricing_type.is_recurring() && fields.term.is_none() {
        errors.push(FieldError::new("term", &required()));
    }
    errors.extend(schema_for(pricing_type).validate(fields));
    errors
}

/// Structural attributes that pricing depends on.
pub fn validate_structure(structure: &ComponentStructure) -> Result<(), ValidationFailure> {
    ValidationFailure::check(structure_errors(structure))
}

pub(crate) fn structure_errors(structure: &ComponentStructure) -> Vec<FieldError> {
    let (path, value) = match structure {
        ComponentStructure::Slot { unit_name } => ("unitName", unit_name),
        ComponentStructure::Capacity { metric_id } | ComponentStructure::Usage { metric_id, .. } => {
            ("metricId", metric_id)
        }
        ComponentStructure::Rate
        | ComponentStructure::ExtraRecurring { .. }
        | ComponentStructure::OneTime => return Vec::new(),
    };
    match not_blank(value) {
        Ok(()) => Vec::new(),
        Err(error) => vec![FieldError::new(path, &error)],
    }
}
