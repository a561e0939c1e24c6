//! Matrix dimension combinations and reconciliation rows.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One `key=value` coordinate along a metric dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct DimensionValue {
    #[validate(custom(function = "crate::services::validation::not_blank"))]
    pub key: String,
    #[validate(custom(function = "crate::services::validation::not_blank"))]
    pub value: String,
}

impl DimensionValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A priced (or declared) point in a metric's dimension space.
///
/// Identity is the ordered pair of coordinates, so `(region=us, tier=gold)`
/// and `(tier=gold, region=us)` are different combinations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatrixCombination {
    pub dimension1: DimensionValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension2: Option<DimensionValue>,
}

impl MatrixCombination {
    pub fn single(dimension1: DimensionValue) -> Self {
        Self {
            dimension1,
            dimension2: None,
        }
    }

    pub fn pair(dimension1: DimensionValue, dimension2: DimensionValue) -> Self {
        Self {
            dimension1,
            dimension2: Some(dimension2),
        }
    }
}

impl std::fmt::Display for MatrixCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.dimension1.key, self.dimension1.value)?;
        if let Some(d2) = &self.dimension2 {
            write!(f, ", {}={}", d2.key, d2.value)?;
        }
        Ok(())
    }
}

/// Reconciliation status of a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// Priced and still declared by the metric.
    Active,
    /// Declared by the metric but not priced yet.
    Missing,
    /// Priced but no longer declared.
    Orphaned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub combination: MatrixCombination,
    pub status: RowStatus,
}

/// A dimension declared on a billable metric, with its allowed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDimension {
    pub key: String,
    pub values: Vec<String>,
}

/// Billable metric definition as returned by the metric catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDefinition {
    pub metric_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dimensions: Vec<MetricDimension>,
}
