//! Domain models for pricing-service.

mod cadence;
mod form;
mod matrix;
mod payload;
mod pricing_type;
mod structure;

pub use cadence::Cadence;
pub use form::{non_blank, FormFields, MatrixRowForm, ThresholdForm, TierRowForm};
pub use matrix::{
    DimensionValue, DisplayRow, MatrixCombination, MetricDefinition, MetricDimension, RowStatus,
};
pub use payload::{
    CapacityPricing, MatrixPricing, MatrixRow, PackagePricing, PerUnitPricing, PriceInput,
    PricingPayload, QuantityPricing, RatePricing, SlotPricing, TierRow, TieredPricing,
};
pub use pricing_type::{FeeType, PricingType, UsageModel};
pub use structure::{BillingType, ComponentStructure};
