//! Report request assembly

use crate::filter::{compile, FilterExpression};
use crate::report::kind::{ReportKind, DEFAULT_PAGE_VIEW_DIMENSION};
use crate::report::request::{DateRange, FieldRef, ReportRequest};
use crate::validation::ValidatedParams;

/// Build the `runReport` request for one report kind
///
/// Pure: compiles the explicit filter, merges it with the implicit
/// event-name condition and attaches the row limit only when positive.
pub fn build(kind: ReportKind, params: &ValidatedParams) -> ReportRequest {
    let implicit = implicit_condition(kind, params);
    let explicit = compile(params.filter.as_ref());

    ReportRequest {
        date_ranges: vec![DateRange {
            start_date: params.start_date.clone(),
            end_date: params.end_date.clone(),
        }],
        dimensions: dimensions_for(kind, params),
        metrics: kind.metrics().iter().copied().map(FieldRef::from).collect(),
        dimension_filter: merge_filters(implicit, explicit),
        limit: params.limit.filter(|&limit| limit > 0),
    }
}

fn dimensions_for(kind: ReportKind, params: &ValidatedParams) -> Vec<FieldRef> {
    if !kind.accepts_dimensions() {
        return kind.default_dimensions().iter().copied().map(FieldRef::from).collect();
    }

    let requested: Vec<FieldRef> = params
        .dimensions
        .iter()
        .flatten()
        .filter(|name| !name.is_empty())
        .map(|name| FieldRef { name: name.clone() })
        .collect();

    if requested.is_empty() {
        vec![FieldRef::from(DEFAULT_PAGE_VIEW_DIMENSION)]
    } else {
        requested
    }
}

/// Per-kind condition that is always applied; only events have one
fn implicit_condition(kind: ReportKind, params: &ValidatedParams) -> Option<FilterExpression> {
    if !kind.accepts_event_name() {
        return None;
    }
    params
        .event_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .map(|name| FilterExpression::exact("eventName", name))
}

/// Combine the implicit and explicit filters
///
/// Both present gives a two-member AND group with the implicit condition
/// first; otherwise whichever exists is used as is.
pub fn merge_filters(
    implicit: Option<FilterExpression>,
    explicit: Option<FilterExpression>,
) -> Option<FilterExpression> {
    match (implicit, explicit) {
        (Some(implicit), Some(explicit)) => Some(FilterExpression::and(vec![implicit, explicit])),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{CombineOperator, DimensionCondition, MetricCondition, SimpleFilter};

    fn params() -> ValidatedParams {
        ValidatedParams::new("2024-01-01", "2024-01-31")
    }

    fn country_filter() -> SimpleFilter {
        SimpleFilter {
            dimension: vec![DimensionCondition {
                string_equals: Some("Japan".to_string()),
                ..DimensionCondition::named("country")
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_page_views_default_dimension() {
        let request = build(ReportKind::PageViews, &params());
        assert_eq!(request.dimension_names(), vec!["hostName"]);
        assert_eq!(request.metric_names(), vec!["screenPageViews"]);
        assert_eq!(request.date_ranges[0].start_date, "2024-01-01");
        assert_eq!(request.date_ranges[0].end_date, "2024-01-31");
    }

    #[test]
    fn test_page_views_caller_dimensions() {
        let p = ValidatedParams {
            dimensions: Some(vec!["pagePath".to_string(), String::new(), "country".to_string()]),
            ..params()
        };
        let request = build(ReportKind::PageViews, &p);
        assert_eq!(request.dimension_names(), vec!["pagePath", "country"]);

        let all_empty = ValidatedParams {
            dimensions: Some(vec![String::new()]),
            ..params()
        };
        assert_eq!(
            build(ReportKind::PageViews, &all_empty).dimension_names(),
            vec!["hostName"]
        );
    }

    #[test]
    fn test_fixed_shapes() {
        let p = ValidatedParams {
            dimensions: Some(vec!["ignored".to_string()]),
            ..params()
        };

        let active = build(ReportKind::ActiveUsers, &p);
        assert_eq!(active.dimension_names(), vec!["date"]);
        assert_eq!(active.metric_names(), vec!["activeUsers", "newUsers"]);

        let events = build(ReportKind::Events, &p);
        assert_eq!(events.dimension_names(), vec!["eventName", "date"]);
        assert_eq!(events.metric_names(), vec!["eventCount"]);

        let behavior = build(ReportKind::UserBehavior, &p);
        assert_eq!(behavior.dimension_names(), vec!["date"]);
        assert_eq!(
            behavior.metric_names(),
            vec!["averageSessionDuration", "bounceRate", "sessionsPerUser"]
        );

        let sources = build(ReportKind::SourceMedium, &p);
        assert_eq!(
            sources.dimension_names(),
            vec!["sessionSource", "sessionMedium", "sessionCampaignName"]
        );
        assert_eq!(sources.metric_names(), vec!["sessions", "activeUsers"]);
    }

    #[test]
    fn test_limit_attached_only_when_positive() {
        assert_eq!(build(ReportKind::Events, &params()).limit, Some(50));

        let zero = ValidatedParams { limit: Some(0), ..params() };
        assert_eq!(build(ReportKind::Events, &zero).limit, None);

        let unset = ValidatedParams { limit: None, ..params() };
        assert_eq!(build(ReportKind::Events, &unset).limit, None);
    }

    #[test]
    fn test_event_name_alone_is_bare_leaf() {
        let p = ValidatedParams {
            event_name: Some("purchase".to_string()),
            ..params()
        };
        assert_eq!(
            build(ReportKind::Events, &p).dimension_filter,
            Some(FilterExpression::exact("eventName", "purchase"))
        );
    }

    #[test]
    fn test_event_name_merged_first_with_explicit_filter() {
        let filter = SimpleFilter {
            metric: vec![MetricCondition {
                greater_than: Some(10.0),
                ..MetricCondition::named("eventCount")
            }],
            operator: CombineOperator::Or,
            ..country_filter()
        };
        let explicit = compile(Some(&filter)).unwrap();

        let p = ValidatedParams {
            event_name: Some("page_view".to_string()),
            filter: Some(filter),
            ..params()
        };

        assert_eq!(
            build(ReportKind::Events, &p).dimension_filter,
            Some(FilterExpression::and(vec![
                FilterExpression::exact("eventName", "page_view"),
                explicit,
            ]))
        );
    }

    #[test]
    fn test_explicit_filter_alone_used_verbatim() {
        let p = ValidatedParams {
            filter: Some(country_filter()),
            ..params()
        };
        assert_eq!(
            build(ReportKind::UserBehavior, &p).dimension_filter,
            Some(FilterExpression::exact("country", "Japan"))
        );
    }

    #[test]
    fn test_event_name_ignored_for_other_kinds() {
        let p = ValidatedParams {
            event_name: Some("purchase".to_string()),
            ..params()
        };
        assert_eq!(build(ReportKind::ActiveUsers, &p).dimension_filter, None);
    }

    #[test]
    fn test_empty_event_name_adds_nothing() {
        let p = ValidatedParams {
            event_name: Some(String::new()),
            ..params()
        };
        assert_eq!(build(ReportKind::Events, &p).dimension_filter, None);
    }
}
