//! Response normalization and client-side pagination
//!
//! The Data API returns every row of a report at once; paging happens here by
//! slicing the flattened rows.

use crate::report::response::{CellValue, Header, Row, TabularResponse};
use serde::Serialize;
use serde_json::{Map, Value};

/// One flattened row: header name -> raw cell value
pub type Record = Map<String, Value>;

/// Normalized, paged report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult {
    pub records: Vec<Record>,
    /// Absent for the degenerate no-rows result
    #[serde(flatten)]
    pub page: Option<PageDetails>,
    /// Rows in the response before slicing
    pub total_count: usize,
    pub limit: Option<u32>,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDetails {
    pub dimension_headers: Vec<String>,
    pub metric_headers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,
    pub has_more: bool,
    pub page_count: usize,
    pub current_page: usize,
}

impl PaginatedResult {
    fn degenerate(limit: Option<u32>, offset: u32) -> Self {
        Self {
            records: Vec::new(),
            page: None,
            total_count: 0,
            limit,
            offset,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.page.is_none()
    }
}

/// Flatten and page a tabular response
///
/// A missing response or missing `rows` yields the degenerate result. A zero
/// or absent `limit` means "no limit". Never fails: short or mismatched
/// header arrays only drop the affected cells.
pub fn normalize(response: Option<&TabularResponse>, limit: Option<u32>, offset: u32) -> PaginatedResult {
    let limit = limit.filter(|&l| l > 0);

    let Some((response, rows)) = response.and_then(|r| r.rows.as_deref().map(|rows| (r, rows)))
    else {
        return PaginatedResult::degenerate(limit, offset);
    };

    let total_count = rows.len();
    let records = page_slice(rows, limit, offset)
        .iter()
        .map(|row| flatten_row(row, &response.dimension_headers, &response.metric_headers))
        .collect();

    let (has_more, page_count, current_page) = match limit {
        Some(limit) => {
            let limit = limit as usize;
            let offset = offset as usize;
            (
                offset.saturating_add(limit) < total_count,
                total_count.div_ceil(limit),
                offset / limit + 1,
            )
        }
        None => (false, 1, 1),
    };

    PaginatedResult {
        records,
        page: Some(PageDetails {
            dimension_headers: response.dimension_names(),
            metric_headers: response.metric_names(),
            row_count: response.row_count,
            has_more,
            page_count,
            current_page,
        }),
        total_count,
        limit,
        offset,
    }
}

/// Rows in `[offset, offset + limit)`, or `[offset, ..)` without a limit
fn page_slice(rows: &[Row], limit: Option<u32>, offset: u32) -> &[Row] {
    let start = (offset as usize).min(rows.len());
    let end = match limit {
        Some(limit) => start.saturating_add(limit as usize).min(rows.len()),
        None => rows.len(),
    };
    &rows[start..end]
}

fn flatten_row(row: &Row, dimension_headers: &[Header], metric_headers: &[Header]) -> Record {
    let mut record = Record::new();
    write_cells(&mut record, dimension_headers, &row.dimension_values);
    write_cells(&mut record, metric_headers, &row.metric_values);
    record
}

/// Zip headers with values by position; cells past the header list are dropped
fn write_cells(record: &mut Record, headers: &[Header], values: &[CellValue]) {
    for (header, cell) in headers.iter().zip(values) {
        if header.name.is_empty() {
            continue;
        }
        if let Some(value) = &cell.value {
            record.insert(header.name.clone(), Value::String(value.clone()));
        }
    }
}
