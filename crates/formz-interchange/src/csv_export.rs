//! CSV Export functionality
//!
//! One header row (`ID`, `Submission date`, then every element label) and
//! one record per submission, columns in schema order. Records are joined
//! with `\n`.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use formz_core::SubmissionRow;
use formz_designer::{ColumnMap, FormElement, derive_column_name};

/// MIME type offered for downloads
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// chrono format of the `Submission date` column
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator between the selected values of a checkbox cell
pub const DEFAULT_LIST_SEPARATOR: &str = "; ";

const RECORD_DELIMITER: &str = "\n";
const FIELD_DELIMITER: char = ',';
const QUALIFIER: char = '"';

/// Errors during CSV export
#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Form has no responses to export")]
    NoResponses,
}

/// Formatting knobs of the export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub date_format: String,
    pub list_separator: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            list_separator: DEFAULT_LIST_SEPARATOR.to_string(),
        }
    }
}

/// `<slug of title>_<YYYY-MM-DD>.csv`, or `..._responses.csv` without a date.
///
/// Titles that slug to nothing fall back to `form`.
pub fn csv_filename(title: &str, date: Option<NaiveDate>) -> String {
    let slug = derive_column_name(title);
    let slug = if slug.is_empty() { "form".to_string() } else { slug };
    let suffix = match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "responses".to_string(),
    };
    format!("{}_{}.csv", slug, suffix)
}

/// Builds CSV text from a form's elements and its stored submissions
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    options: CsvOptions,
}

impl CsvExporter {
    pub fn new(options: CsvOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Header cells, unquoted
    pub fn header(&self, elements: &[FormElement]) -> Vec<String> {
        let mut header = Vec::with_capacity(elements.len() + 2);
        header.push("ID".to_string());
        header.push("Submission date".to_string());
        header.extend(elements.iter().map(|e| e.label.clone()));
        header
    }

    /// Data cells of one submission, unquoted
    pub fn record(&self, columns: &ColumnMap, row: &SubmissionRow) -> Vec<String> {
        let mut record = Vec::with_capacity(columns.len() + 2);
        record.push(row.id.clone());
        record.push(row.created_at.format(&self.options.date_format).to_string());
        record.extend(
            columns
                .columns()
                .map(|column| row.value(column).to_cell(&self.options.list_separator)),
        );
        record
    }

    /// Render the whole export as one string
    pub fn to_csv(&self, elements: &[FormElement], rows: &[SubmissionRow]) -> String {
        let columns = ColumnMap::resolve(elements);

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(Self::join_cells(&self.header(elements)));
        lines.extend(rows.iter().map(|row| Self::join_cells(&self.record(&columns, row))));
        lines.join(RECORD_DELIMITER)
    }

    /// Write the export to `path`, replacing any existing file
    pub fn write_to(
        &self,
        path: &Path,
        elements: &[FormElement],
        rows: &[SubmissionRow],
    ) -> Result<(), CsvExportError> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(self.to_csv(elements, rows).as_bytes())?;
        writer.flush()?;

        tracing::info!(path = %path.display(), rows = rows.len(), "exported responses to CSV");
        Ok(())
    }

    /// Write the export into `dir` under [`csv_filename`] and return the path.
    ///
    /// Refuses to write a file for a form nobody has answered.
    pub fn export_to_dir(
        &self,
        dir: &Path,
        title: &str,
        date: Option<NaiveDate>,
        elements: &[FormElement],
        rows: &[SubmissionRow],
    ) -> Result<PathBuf, CsvExportError> {
        if rows.is_empty() {
            return Err(CsvExportError::NoResponses);
        }

        let path = dir.join(csv_filename(title, date));
        self.write_to(&path, elements, rows)?;
        Ok(path)
    }

    fn join_cells(cells: &[String]) -> String {
        cells
            .iter()
            .map(|cell| Self::qualify_value(cell))
            .collect::<Vec<_>>()
            .join(&FIELD_DELIMITER.to_string())
    }

    /// Quote cells containing the delimiter, the qualifier or a line break,
    /// doubling embedded qualifiers.
    fn qualify_value(value: &str) -> String {
        let needs_quotes = value
            .chars()
            .any(|c| c == FIELD_DELIMITER || c == QUALIFIER || c == '\n' || c == '\r');
        if !needs_quotes {
            return value.to_string();
        }

        let escaped = value.replace(QUALIFIER, &format!("{}{}", QUALIFIER, QUALIFIER));
        format!("{}{}{}", QUALIFIER, escaped, QUALIFIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use formz_core::{SubmissionMap, SubmissionValue};
    use formz_designer::{DdlGenerator, ElementFactory, FormElementType, SqlDialect};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn row(id: &str, values: Vec<(&str, SubmissionValue)>) -> SubmissionRow {
        SubmissionRow {
            id: id.to_string(),
            created_at: Utc
                .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<SubmissionMap>(),
        }
    }

    fn survey() -> Vec<FormElement> {
        vec![
            ElementFactory::create(FormElementType::Text).with_label("Full Name"),
            ElementFactory::create(FormElementType::Checkbox)
                .with_label("Topics")
                .with_options(["Rust", "Go"]),
            ElementFactory::create(FormElementType::Rating).with_label("Score"),
        ]
    }

    #[test]
    fn test_to_csv() {
        let rows = vec![
            row(
                "r1",
                vec![
                    ("full_name", "Ada".into()),
                    (
                        "topics",
                        SubmissionValue::MultiChoice(vec!["rust".into(), "go".into()]),
                    ),
                    ("score", SubmissionValue::Number(4.0)),
                ],
            ),
            row("r2", vec![("full_name", "He said, \"hi\"".into())]),
        ];

        let csv = CsvExporter::default().to_csv(&survey(), &rows);

        assert_eq!(
            csv,
            indoc! {r#"
                ID,Submission date,Full Name,Topics,Score
                r1,2024-03-01 09:30:00,Ada,rust; go,4
                r2,2024-03-01 09:30:00,"He said, ""hi""",,"#}
        );
    }

    #[test]
    fn test_qualify_value() {
        assert_eq!(CsvExporter::qualify_value("plain"), "plain");
        assert_eq!(CsvExporter::qualify_value("a,b"), "\"a,b\"");
        assert_eq!(CsvExporter::qualify_value("say \"x\""), "\"say \"\"x\"\"\"");
        assert_eq!(CsvExporter::qualify_value("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_empty_schema_header_only() {
        let csv = CsvExporter::default().to_csv(&[], &[row("r1", vec![])]);
        assert_eq!(csv, "ID,Submission date\nr1,2024-03-01 09:30:00");
    }

    #[test]
    fn test_custom_options() {
        let exporter = CsvExporter::new(CsvOptions {
            date_format: "%d/%m/%Y".to_string(),
            list_separator: "|".to_string(),
        });
        let rows = vec![row(
            "r1",
            vec![("topics", SubmissionValue::MultiChoice(vec!["a".into(), "b".into()]))],
        )];

        let csv = exporter.to_csv(&survey(), &rows);
        assert_eq!(csv.lines().nth(1), Some("r1,01/03/2024,,a|b,"));
    }

    #[test]
    fn test_export_columns_match_ddl_columns() {
        let mut elements = survey();
        elements.push(ElementFactory::create(FormElementType::Toggle).with_label("Full name"));

        let columns: Vec<String> = ColumnMap::resolve(&elements)
            .columns()
            .map(String::from)
            .collect();
        let ddl = DdlGenerator::generate_create_table("t", &elements, SqlDialect::Postgresql);
        let ddl_columns: Vec<String> = ddl
            .lines()
            .skip(2)
            .filter_map(|line| line.split_whitespace().next())
            .filter(|word| *word != ");")
            .map(String::from)
            .collect();

        assert_eq!(ddl_columns, columns);
        assert_eq!(columns, vec!["full_name", "topics", "score", "full_name_2"]);

        let rows = vec![row(
            "r1",
            vec![
                ("full_name", "Ada".into()),
                ("full_name_2", SubmissionValue::Bool(true)),
            ],
        )];
        let csv = CsvExporter::default().to_csv(&elements, &rows);
        assert_eq!(csv.lines().nth(1), Some("r1,2024-03-01 09:30:00,Ada,,,true"));
    }

    #[test]
    fn test_csv_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(csv_filename("Customer Survey!", date), "customer_survey_2024-03-01.csv");
        assert_eq!(csv_filename("Customer Survey", None), "customer_survey_responses.csv");
        assert_eq!(csv_filename("???", None), "form_responses.csv");
    }

    #[test]
    fn test_export_to_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let exporter = CsvExporter::default();
        let elements = survey();

        let err = exporter
            .export_to_dir(dir.path(), "Survey", None, &elements, &[])
            .expect_err("no responses");
        assert!(matches!(err, CsvExportError::NoResponses));

        let rows = vec![row("r1", vec![("full_name", "Ada".into())])];
        let path = exporter
            .export_to_dir(dir.path(), "Survey", None, &elements, &rows)
            .expect("export succeeds");

        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("survey_responses.csv"));
        let written = std::fs::read_to_string(&path).expect("read export");
        assert_eq!(written, exporter.to_csv(&elements, &rows));
    }
}
