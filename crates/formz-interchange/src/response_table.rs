//! Tabular responses view
//!
//! The grid shown on the responses screen: shortened submission id, date,
//! then one column per element. Checkbox selections are joined with `", "`
//! and missing cells show as `-`.

use formz_core::{SubmissionRow, SubmissionValue};
use formz_designer::{ColumnMap, FormElement};

/// Separator between the selected values of a checkbox cell
pub const TABLE_LIST_SEPARATOR: &str = ", ";

const MISSING_CELL: &str = "-";
const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResponseTable {
    pub fn build(elements: &[FormElement], rows: &[SubmissionRow], date_format: &str) -> Self {
        let columns = ColumnMap::resolve(elements);

        let mut headers = vec!["ID".to_string(), "Date".to_string()];
        headers.extend(elements.iter().map(|e| e.label.clone()));

        let rows = rows
            .iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(headers.len());
                cells.push(short_id(&row.id));
                cells.push(row.created_at.format(date_format).to_string());
                cells.extend(columns.columns().map(|column| cell(row.value(column))));
                cells
            })
            .collect();

        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn short_id(id: &str) -> String {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => format!("{}...", &id[..end]),
        None => id.to_string(),
    }
}

fn cell(value: &SubmissionValue) -> String {
    if value.is_null() {
        MISSING_CELL.to_string()
    } else {
        value.to_cell(TABLE_LIST_SEPARATOR)
    }
}
