//! End-to-end report pipeline: validate, build, query, normalize

use crate::client::ReportService;
use crate::error::ReportError;
use crate::report::{build, normalize, PaginatedResult, ReportKind};
use crate::validation::validate;
use serde_json::Value;

/// Run one report tool call
///
/// Validation failures never reach the remote service. Remote errors are
/// returned unchanged; nothing is retried.
pub async fn build_and_normalize(
    kind: ReportKind,
    raw_params: &Value,
    service: &dyn ReportService,
) -> Result<PaginatedResult, ReportError> {
    let params = validate(kind, raw_params)?;
    let request = build(kind, &params);
    let response = service.run_report(&request).await?;
    Ok(normalize(Some(&response), params.limit, params.offset))
}
