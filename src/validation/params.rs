//! Tool argument validation and defaulting

use crate::error::{FieldViolation, ValidationError};
use crate::filter::SimpleFilter;
use crate::report::ReportKind;
use crate::validation::schema::check_arguments;
use serde_json::{Map, Value};

pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 1000;
pub const DEFAULT_OFFSET: u32 = 0;

/// Tool arguments after validation and defaulting
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParams {
    pub start_date: String,
    pub end_date: String,
    /// Caller-supplied dimensions with non-string and empty entries removed
    pub dimensions: Option<Vec<String>>,
    pub event_name: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
    pub filter: Option<SimpleFilter>,
}

impl ValidatedParams {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            dimensions: None,
            event_name: None,
            limit: Some(DEFAULT_LIMIT),
            offset: DEFAULT_OFFSET,
            filter: None,
        }
    }
}

/// Validate raw tool arguments for one report kind
///
/// `null` object members are treated as absent everywhere, then the
/// arguments are checked against the tool's JSON Schema and every violation
/// is reported at once. Fields a report kind does not accept are ignored.
pub fn validate(kind: ReportKind, raw: &Value) -> Result<ValidatedParams, ValidationError> {
    let raw = strip_nulls(raw);

    let violations = check_arguments(kind, &raw);
    if !violations.is_empty() {
        return Err(ValidationError::new(violations));
    }

    let Some(obj) = raw.as_object() else {
        return Err(ValidationError::new(vec![FieldViolation::new("arguments", "object")]));
    };

    let filter = obj
        .get("filter")
        .map(|value| serde_json::from_value::<SimpleFilter>(value.clone()))
        .transpose()
        .map_err(|e| ValidationError::new(vec![FieldViolation::new("filter", e.to_string())]))?;

    Ok(ValidatedParams {
        start_date: string_field(obj, "startDate").unwrap_or_default(),
        end_date: string_field(obj, "endDate").unwrap_or_default(),
        dimensions: if kind.accepts_dimensions() {
            obj.get("dimensions").and_then(Value::as_array).map(|items| clean_dimensions(items))
        } else {
            None
        },
        event_name: if kind.accepts_event_name() {
            string_field(obj, "eventName")
        } else {
            None
        },
        limit: Some(integer_field(obj, "limit").unwrap_or(DEFAULT_LIMIT)),
        offset: integer_field(obj, "offset").unwrap_or(DEFAULT_OFFSET),
        filter,
    })
}

/// Copy of `value` without `null` object members; array entries are kept
fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(obj) => Value::Object(
            obj.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_nulls).collect()),
        other => other.clone(),
    }
}

/// Non-string and empty entries are dropped rather than rejected
fn clean_dimensions(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn string_field(obj: &Map<String, Value>, name: &str) -> Option<String> {
    obj.get(name).and_then(Value::as_str).map(str::to_string)
}

/// Schema-checked integer; JSON Schema also accepts `50.0` as an integer
fn integer_field(obj: &Map<String, Value>, name: &str) -> Option<u32> {
    let value = obj.get(name)?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
        .and_then(|n| u32::try_from(n).ok())
}
