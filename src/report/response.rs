//! Tabular `runReport` response

use serde::{Deserialize, Serialize};

/// Response of a `runReport` call
///
/// Every array is optional on the wire; GA4 omits `rows` entirely when a
/// report matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabularResponse {
    #[serde(default)]
    pub dimension_headers: Vec<Header>,
    #[serde(default)]
    pub metric_headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,
    /// Server-reported total, independent of the rows returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,
}

impl TabularResponse {
    pub fn dimension_names(&self) -> Vec<String> {
        self.dimension_headers.iter().map(|h| h.name.clone()).collect()
    }

    pub fn metric_names(&self) -> Vec<String> {
        self.metric_headers.iter().map(|h| h.name.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
}

impl From<&str> for Header {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metric_type: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Vec<CellValue>,
    #[serde(default)]
    pub metric_values: Vec<CellValue>,
}

impl Row {
    pub fn new(dimensions: &[&str], metrics: &[&str]) -> Self {
        Self {
            dimension_values: dimensions.iter().map(|v| CellValue::from(*v)).collect(),
            metric_values: metrics.iter().map(|v| CellValue::from(*v)).collect(),
        }
    }
}

/// Raw string value of one cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }
}
