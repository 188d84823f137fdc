//! formz data interchange
//!
//! Turns stored submissions back into something people can read: a CSV
//! export and the tabular responses view. Both walk the form's elements in
//! schema order and look cells up by the same resolved column names the
//! DDL generator and the submission store use.
//!
//! # Example
//!
//! ```rust
//! use formz_designer::{ElementFactory, FormElementType};
//! use formz_interchange::CsvExporter;
//!
//! let elements = vec![ElementFactory::create(FormElementType::Text).with_label("Name")];
//! let csv = CsvExporter::default().to_csv(&elements, &[]);
//! assert_eq!(csv, "ID,Submission date,Name");
//! ```

mod csv_export;
mod response_table;

pub use csv_export::{
    CSV_MIME_TYPE, CsvExportError, CsvExporter, CsvOptions, DEFAULT_DATE_FORMAT,
    DEFAULT_LIST_SEPARATOR, csv_filename,
};
pub use response_table::{ResponseTable, TABLE_LIST_SEPARATOR};
