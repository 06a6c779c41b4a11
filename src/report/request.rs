//! Report request sent to the GA4 `runReport` endpoint

use crate::filter::FilterExpression;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

/// Named dimension or metric reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub name: String,
}

impl From<&str> for FieldRef {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Body of a `runReport` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub date_ranges: Vec<DateRange>,
    pub dimensions: Vec<FieldRef>,
    pub metrics: Vec<FieldRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ReportRequest {
    pub fn dimension_names(&self) -> Vec<&str> {
        self.dimensions.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn metric_names(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.name.as_str()).collect()
    }
}
