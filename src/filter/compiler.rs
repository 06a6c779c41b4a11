//! SimpleFilter -> FilterExpression compiler

use crate::filter::expression::{
    BetweenFilter, EmptyFilter, FilterExpression, InListFilter, MatchType, NumericFilter,
    Operation, Predicate, StringFilter,
};
use crate::filter::simple::{CombineOperator, DimensionCondition, MetricCondition, SimpleFilter};

/// Compile a simple filter into a GA4 filter expression
///
/// Returns `None` when there is nothing to restrict: the filter is absent or
/// both condition lists are empty. A single condition yields a bare leaf;
/// two or more are wrapped in one AND/OR group, dimensions first.
pub fn compile(filter: Option<&SimpleFilter>) -> Option<FilterExpression> {
    let filter = filter?;

    let mut leaves: Vec<FilterExpression> = Vec::with_capacity(filter.condition_count());
    leaves.extend(filter.dimension.iter().map(compile_dimension));
    leaves.extend(filter.metric.iter().map(compile_metric));

    match leaves.len() {
        0 => None,
        1 => leaves.pop(),
        _ => Some(match filter.operator {
            CombineOperator::Or => FilterExpression::or(leaves),
            CombineOperator::And => FilterExpression::and(leaves),
        }),
    }
}

/// Resolve the predicate of one dimension condition
///
/// Priority: equals > contains > beginsWith > endsWith > regex > inList >
/// isEmpty. Empty strings and empty lists do not count as set.
pub fn compile_dimension(cond: &DimensionCondition) -> FilterExpression {
    let string_predicates = [
        (&cond.string_equals, MatchType::Exact),
        (&cond.string_contains, MatchType::Contains),
        (&cond.string_begins_with, MatchType::BeginsWith),
        (&cond.string_ends_with, MatchType::EndsWith),
        (&cond.string_regex, MatchType::FullRegexp),
    ];

    let string_match = string_predicates
        .into_iter()
        .find_map(|(value, match_type)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some(Predicate::StringFilter(StringFilter {
                match_type,
                value: v.to_string(),
                case_sensitive: cond.case_sensitive,
            })),
            _ => None,
        });

    let predicate = match string_match {
        Some(predicate) => predicate,
        None => match &cond.in_list {
            Some(values) if !values.is_empty() => Predicate::InListFilter(InListFilter {
                values: values.clone(),
                case_sensitive: cond.case_sensitive,
            }),
            _ => Predicate::EmptyFilter(EmptyFilter {}),
        },
    };

    FilterExpression::leaf(cond.name.clone(), predicate)
}

/// Resolve the predicate of one metric condition
///
/// Priority: equals > lessThan > lessThanOrEqual > greaterThan >
/// greaterThanOrEqual > between > isEmpty.
pub fn compile_metric(cond: &MetricCondition) -> FilterExpression {
    let comparisons = [
        (cond.equals, Operation::Equal),
        (cond.less_than, Operation::LessThan),
        (cond.less_than_or_equal, Operation::LessThanOrEqual),
        (cond.greater_than, Operation::GreaterThan),
        (cond.greater_than_or_equal, Operation::GreaterThanOrEqual),
    ];

    let comparison = comparisons
        .into_iter()
        .find_map(|(value, operation)| {
            value.map(|v| {
                Predicate::NumericFilter(NumericFilter {
                    operation,
                    value: v.into(),
                })
            })
        });

    // Inverted ranges are passed through for the API to judge
    let predicate = comparison
        .or_else(|| {
            cond.between.map(|range| {
                Predicate::BetweenFilter(BetweenFilter {
                    from_value: range.from.into(),
                    to_value: range.to.into(),
                })
            })
        })
        .unwrap_or(Predicate::EmptyFilter(EmptyFilter {}));

    FilterExpression::leaf(cond.name.clone(), predicate)
}
