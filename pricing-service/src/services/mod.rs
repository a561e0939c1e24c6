//! Services module for pricing-service.

pub mod builder;
pub mod mapper;
pub mod reconciliation;
pub mod resolver;
pub mod validation;

pub use builder::{build_price_inputs, price_component, restore_form, PriceComponent, RestoredForm};
pub use mapper::{from_wire_pricing, from_wire_value, price_inputs_from_value, to_wire_pricing};
pub use reconciliation::{
    declared_combinations, reconcile, reconcile_metric, CachedDimensionLookup, DimensionLookup,
    MetricCatalog,
};
pub use resolver::resolve_pricing_type;
pub use validation::{
    default_fields, is_plain_decimal, is_precise, schema_for, validate_price_entry, validate_pricing,
    validate_structure, FieldError, PricingSchema, ValidationFailure,
};
