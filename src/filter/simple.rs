//! Caller-facing filter description

use serde::{Deserialize, Serialize};

/// Flat filter accepted by every report tool
///
/// Unknown fields are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleFilter {
    #[serde(default)]
    pub dimension: Vec<DimensionCondition>,
    #[serde(default)]
    pub metric: Vec<MetricCondition>,
    #[serde(default)]
    pub operator: CombineOperator,
}

impl SimpleFilter {
    /// Total number of conditions across both lists
    pub fn condition_count(&self) -> usize {
        self.dimension.len() + self.metric.len()
    }

    pub fn is_empty(&self) -> bool {
        self.condition_count() == 0
    }
}

/// Boolean operator applied across all conditions of a filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombineOperator {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// String-valued condition on a dimension
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionCondition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_equals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_contains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_begins_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_ends_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl DimensionCondition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Numeric range used by `between` conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub from: f64,
    pub to: f64,
}

/// Numeric condition on a metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCondition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub between: Option<NumericRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
}

impl MetricCondition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
