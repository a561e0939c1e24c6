//! Matrix dimension reconciliation.
//!
//! Compares the combinations a matrix price list covers with the
//! combinations its metric currently declares.

use crate::error::{PricingError, PricingResult};
use crate::models::{
    DimensionValue, DisplayRow, MatrixCombination, MatrixRowForm, MetricDefinition,
    MetricDimension, RowStatus,
};
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Classify every combination as active, orphaned or missing.
///
/// Priced combinations come first, in input order; declared combinations
/// that are not priced follow in declared order. Nothing is sorted.
pub fn reconcile(
    priced: &[MatrixCombination],
    declared: &[MatrixCombination],
) -> Vec<DisplayRow> {
    let declared_set: HashSet<&MatrixCombination> = declared.iter().collect();
    let priced_set: HashSet<&MatrixCombination> = priced.iter().collect();

    let mut rows: Vec<DisplayRow> = priced
        .iter()
        .map(|combination| DisplayRow {
            combination: combination.clone(),
            status: if declared_set.contains(combination) {
                RowStatus::Active
            } else {
                RowStatus::Orphaned
            },
        })
        .collect();

    let mut emitted = HashSet::new();
    for combination in declared {
        if !priced_set.contains(combination) && emitted.insert(combination) {
            rows.push(DisplayRow {
                combination: combination.clone(),
                status: RowStatus::Missing,
            });
        }
    }

    rows
}

/// Expand a metric's dimension value sets into the combinations it declares.
///
/// One dimension gives one combination per value; two give their cartesian
/// product with the first dimension outermost. Matrix pricing has at most two
/// axes, so further dimensions are ignored.
pub fn declared_combinations(dimensions: &[MetricDimension]) -> Vec<MatrixCombination> {
    if dimensions.len() > 2 {
        tracing::warn!(
            dimensions = dimensions.len(),
            "Matrix pricing supports two dimensions, ignoring the rest"
        );
    }

    match dimensions {
        [] => Vec::new(),
        [first] => first
            .values
            .iter()
            .map(|value| MatrixCombination::single(DimensionValue::new(&first.key, value)))
            .collect(),
        [first, second, ..] => first
            .values
            .iter()
            .flat_map(|v1| {
                second.values.iter().map(move |v2| {
                    MatrixCombination::pair(
                        DimensionValue::new(&first.key, v1),
                        DimensionValue::new(&second.key, v2),
                    )
                })
            })
            .collect(),
    }
}

/// Source of a metric's declared dimensions.
pub trait DimensionLookup: Send + Sync {
    fn dimensions(&self, metric_id: &str) -> PricingResult<Vec<MetricDimension>>;
}

/// In-memory metric catalog.
#[derive(Debug, Clone, Default)]
pub struct MetricCatalog {
    metrics: HashMap<String, MetricDefinition>,
}

impl MetricCatalog {
    pub fn new(definitions: impl IntoIterator<Item = MetricDefinition>) -> Self {
        Self {
            metrics: definitions
                .into_iter()
                .map(|d| (d.metric_id.clone(), d))
                .collect(),
        }
    }

    /// Load a JSON array of metric definitions.
    pub fn from_file(path: &Path) -> PricingResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PricingError::Catalog(format!("{}: {}", path.display(), e)))?;
        let definitions: Vec<MetricDefinition> = serde_json::from_str(&content)
            .map_err(|e| PricingError::Catalog(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            path = %path.display(),
            metrics = definitions.len(),
            "Loaded metric catalog"
        );

        Ok(Self::new(definitions))
    }

    pub fn get(&self, metric_id: &str) -> Option<&MetricDefinition> {
        self.metrics.get(metric_id)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl DimensionLookup for MetricCatalog {
    fn dimensions(&self, metric_id: &str) -> PricingResult<Vec<MetricDimension>> {
        self.get(metric_id)
            .map(|d| d.dimensions.clone())
            .ok_or_else(|| PricingError::UnknownMetric(metric_id.to_string()))
    }
}

/// Caches another lookup's answers per metric until invalidated.
///
/// Failed lookups are not cached.
pub struct CachedDimensionLookup<L> {
    inner: L,
    cache: DashMap<String, Vec<MetricDimension>>,
}

impl<L: DimensionLookup> CachedDimensionLookup<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    pub fn invalidate(&self, metric_id: &str) {
        self.cache.remove(metric_id);
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn cached_metrics(&self) -> usize {
        self.cache.len()
    }
}

impl<L: DimensionLookup> DimensionLookup for CachedDimensionLookup<L> {
    fn dimensions(&self, metric_id: &str) -> PricingResult<Vec<MetricDimension>> {
        if let Some(hit) = self.cache.get(metric_id) {
            return Ok(hit.value().clone());
        }

        let dimensions = self.inner.dimensions(metric_id)?;
        self.cache
            .insert(metric_id.to_string(), dimensions.clone());
        Ok(dimensions)
    }
}

/// Reconcile a matrix form's rows against the metric's current dimensions.
pub fn reconcile_metric<L: DimensionLookup + ?Sized>(
    lookup: &L,
    metric_id: &str,
    rows: &[MatrixRowForm],
) -> PricingResult<Vec<DisplayRow>> {
    let dimensions = lookup.dimensions(metric_id)?;
    let declared = declared_combinations(&dimensions);
    let priced: Vec<MatrixCombination> = rows.iter().map(MatrixRowForm::combination).collect();

    let display_rows = reconcile(&priced, &declared);

    tracing::debug!(
        metric_id = %metric_id,
        priced = priced.len(),
        declared = declared.len(),
        missing = display_rows.iter().filter(|r| r.status == RowStatus::Missing).count(),
        orphaned = display_rows.iter().filter(|r| r.status == RowStatus::Orphaned).count(),
        "Reconciled matrix dimensions"
    );

    Ok(display_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(value: &str) -> MatrixCombination {
        MatrixCombination::single(DimensionValue::new("region", value))
    }

    #[test]
    fn test_duplicate_declared_is_missing_once() {
        let rows = reconcile(&[], &[region("us"), region("us")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, RowStatus::Missing);
    }

    #[test]
    fn test_declared_combinations_cartesian_order() {
        let dimensions = vec![
            MetricDimension {
                key: "region".to_string(),
                values: vec!["us".to_string(), "eu".to_string()],
            },
            MetricDimension {
                key: "tier".to_string(),
                values: vec!["gold".to_string(), "silver".to_string()],
            },
        ];

        let combos: Vec<String> = declared_combinations(&dimensions)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            combos,
            vec![
                "region=us, tier=gold",
                "region=us, tier=silver",
                "region=eu, tier=gold",
                "region=eu, tier=silver",
            ]
        );
    }

    #[test]
    fn test_declared_combinations_empty() {
        assert!(declared_combinations(&[]).is_empty());
    }

    #[test]
    fn test_catalog_unknown_metric() {
        let catalog = MetricCatalog::default();
        assert!(matches!(
            catalog.dimensions("nope").unwrap_err(),
            PricingError::UnknownMetric(_)
        ));
    }
}
