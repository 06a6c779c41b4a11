//! GA4 `FilterExpression` tree
//!
//! Serializes to the JSON shape of the Data API v1beta `FilterExpression`
//! message, e.g. `{"andGroup": {"expressions": [...]}}` or
//! `{"filter": {"fieldName": "country", "stringFilter": {...}}}`.

use serde::{Deserialize, Serialize};

/// Node of a filter expression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterExpression {
    /// All sub-expressions must match
    AndGroup(FilterExpressionList),
    /// At least one sub-expression must match
    OrGroup(FilterExpressionList),
    /// Single-field predicate
    Filter(Filter),
}

impl FilterExpression {
    pub fn leaf(field_name: impl Into<String>, predicate: Predicate) -> Self {
        FilterExpression::Filter(Filter {
            field_name: field_name.into(),
            predicate,
        })
    }

    pub fn and(expressions: Vec<FilterExpression>) -> Self {
        FilterExpression::AndGroup(FilterExpressionList { expressions })
    }

    pub fn or(expressions: Vec<FilterExpression>) -> Self {
        FilterExpression::OrGroup(FilterExpressionList { expressions })
    }

    /// Exact, case-insensitive string match on one field
    pub fn exact(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::leaf(
            field_name,
            Predicate::StringFilter(StringFilter {
                match_type: MatchType::Exact,
                value: value.into(),
                case_sensitive: false,
            }),
        )
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, FilterExpression::Filter(_))
    }

    /// Sub-expressions of a group node, `None` for a leaf
    pub fn members(&self) -> Option<&[FilterExpression]> {
        match self {
            FilterExpression::AndGroup(list) | FilterExpression::OrGroup(list) => {
                Some(&list.expressions)
            }
            FilterExpression::Filter(_) => None,
        }
    }

    /// Number of leaves in the tree
    pub fn leaf_count(&self) -> usize {
        match self.members() {
            Some(members) => members.iter().map(FilterExpression::leaf_count).sum(),
            None => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterExpressionList {
    pub expressions: Vec<FilterExpression>,
}

/// Predicate against a single named field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_name: String,
    #[serde(flatten)]
    pub predicate: Predicate,
}

/// The one-of predicate carried by a `Filter`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
    StringFilter(StringFilter),
    InListFilter(InListFilter),
    NumericFilter(NumericFilter),
    BetweenFilter(BetweenFilter),
    EmptyFilter(EmptyFilter),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    pub match_type: MatchType,
    pub value: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Exact,
    BeginsWith,
    EndsWith,
    Contains,
    FullRegexp,
    PartialRegexp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InListFilter {
    pub values: Vec<String>,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericFilter {
    pub operation: Operation,
    pub value: NumericValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Equal,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericValue {
    pub double_value: f64,
}

impl From<f64> for NumericValue {
    fn from(double_value: f64) -> Self {
        Self { double_value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetweenFilter {
    pub from_value: NumericValue,
    pub to_value: NumericValue,
}

/// Matches fields whose value is empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyFilter {}
