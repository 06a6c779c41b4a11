//! JSON Schema of the report tool arguments
//!
//! The same schema is advertised in `tools/list` and enforced by `validate`,
//! so a value that satisfies the advertised constraints is never rejected.

use crate::error::FieldViolation;
use crate::report::ReportKind;
use crate::validation::params::{DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_LIMIT};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Literal `YYYY-MM-DD` pattern, no calendar check
pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

pub const DATE_EXPECTED: &str = "Date must be in YYYY-MM-DD format";

/// Largest offset the paginator can represent
pub const MAX_OFFSET: u32 = u32::MAX;

/// One compiled validator per report kind
static VALIDATORS: Lazy<HashMap<ReportKind, Validator>> = Lazy::new(|| {
    ReportKind::ALL
        .into_iter()
        .map(|kind| {
            let validator = jsonschema::validator_for(&validation_schema(kind))
                .unwrap_or_else(|e| panic!("invalid schema for {}: {e}", kind.tool_name()));
            (kind, validator)
        })
        .collect()
});

/// Argument schema of one report tool, as advertised to clients
pub fn input_schema(kind: ReportKind) -> Value {
    let mut properties = Map::new();
    properties.insert(
        "startDate".into(),
        json!({
            "type": "string",
            "pattern": DATE_PATTERN,
            "description": "Start date in YYYY-MM-DD format"
        }),
    );
    properties.insert(
        "endDate".into(),
        json!({
            "type": "string",
            "pattern": DATE_PATTERN,
            "description": "End date in YYYY-MM-DD format"
        }),
    );

    if kind.accepts_dimensions() {
        properties.insert(
            "dimensions".into(),
            json!({
                "type": "array",
                "items": { "type": "string" },
                "description": "Dimensions to group by (e.g., pagePath, country)",
                "default": kind.default_dimensions()
            }),
        );
    }

    if kind.accepts_event_name() {
        properties.insert(
            "eventName".into(),
            json!({ "type": "string", "description": "Specific event name to filter by (optional)" }),
        );
    }

    properties.insert(
        "limit".into(),
        json!({
            "type": "integer",
            "minimum": 1,
            "maximum": MAX_LIMIT,
            "default": DEFAULT_LIMIT,
            "description": format!("Maximum number of results to return (default: {DEFAULT_LIMIT})")
        }),
    );
    properties.insert(
        "offset".into(),
        json!({
            "type": "integer",
            "minimum": 0,
            "maximum": MAX_OFFSET,
            "default": DEFAULT_OFFSET,
            "description": format!("Offset for pagination (default: {DEFAULT_OFFSET})")
        }),
    );
    properties.insert("filter".into(), filter_schema());

    json!({
        "type": "object",
        "properties": properties,
        "required": ["startDate", "endDate"]
    })
}

fn filter_schema() -> Value {
    json!({
        "type": "object",
        "description": "Filter conditions to apply (optional); see ga4://filters-help",
        "properties": {
            "dimension": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "stringEquals": { "type": "string" },
                        "stringContains": { "type": "string" },
                        "stringBeginsWith": { "type": "string" },
                        "stringEndsWith": { "type": "string" },
                        "stringRegex": { "type": "string" },
                        "inList": { "type": "array", "items": { "type": "string" } },
                        "isEmpty": { "type": "boolean" },
                        "caseSensitive": { "type": "boolean", "default": false }
                    },
                    "required": ["name"]
                }
            },
            "metric": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "equals": { "type": "number" },
                        "lessThan": { "type": "number" },
                        "lessThanOrEqual": { "type": "number" },
                        "greaterThan": { "type": "number" },
                        "greaterThanOrEqual": { "type": "number" },
                        "between": {
                            "type": "object",
                            "properties": {
                                "from": { "type": "number" },
                                "to": { "type": "number" }
                            },
                            "required": ["from", "to"]
                        },
                        "isEmpty": { "type": "boolean" }
                    },
                    "required": ["name"]
                }
            },
            "operator": { "type": "string", "enum": ["AND", "OR"], "default": "AND" }
        }
    })
}

/// The enforced schema: `dimensions` entries of any type are accepted here
/// and the unusable ones dropped afterwards
fn validation_schema(kind: ReportKind) -> Value {
    let mut schema = input_schema(kind);
    if let Some(Value::Object(dimensions)) = schema.pointer_mut("/properties/dimensions") {
        dimensions.remove("items");
    }
    schema
}

/// Every schema violation of `raw`, in validator order
pub fn check_arguments(kind: ReportKind, raw: &Value) -> Vec<FieldViolation> {
    VALIDATORS[&kind].iter_errors(raw).map(to_violation).collect()
}

fn to_violation(error: ValidationError<'_>) -> FieldViolation {
    let path = dotted_path(&error.instance_path.to_string());
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property.as_str().map_or_else(|| property.to_string(), str::to_string);
            FieldViolation::new(join(&path, &name), "Required")
        }
        ValidationErrorKind::Pattern { .. } => FieldViolation::new(path, DATE_EXPECTED),
        _ if path.is_empty() => FieldViolation::new("arguments", error.to_string()),
        _ => FieldViolation::new(path, error.to_string()),
    }
}

/// `/filter/dimension/0/name` -> `filter.dimension[0].name`
fn dotted_path(pointer: &str) -> String {
    let mut path = String::new();
    for token in pointer.split('/').skip(1) {
        let token = token.replace("~1", "/").replace("~0", "~");
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            path.push('[');
            path.push_str(&token);
            path.push(']');
        } else {
            path = join(&path, &token);
        }
    }
    path
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}
