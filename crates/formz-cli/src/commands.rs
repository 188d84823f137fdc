//! Command implementations
//!
//! Each command returns the text it would print so the handlers can be
//! exercised without capturing stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use comfy_table::{Table, presets::UTF8_FULL};
use serde_json::Value;

use formz_core::{SqlDialect, SubmissionRow};
use formz_designer::{
    DdlGenerator, ElementFactory, FormElement, FormElementType, FormSchema, ValidationError,
};
use formz_interchange::{CsvExporter, CsvOptions, ResponseTable};
use formz_services::FormData;
use formz_settings::{FormzSettings, SettingsStore, ThemeModePreference, ThemeState};

/// A form read from disk: either a stored form document or a bare element list
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedForm {
    pub title: String,
    pub elements: Vec<FormElement>,
}

impl LoadedForm {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read form file {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Invalid form file {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        match value {
            Value::Array(_) => Ok(Self {
                title: String::new(),
                elements: serde_json::from_value(value)?,
            }),
            Value::Object(_) => {
                let form: FormData = serde_json::from_value(value)?;
                Ok(Self {
                    title: form.title,
                    elements: form.schema,
                })
            }
            _ => bail!("expected a form object or an array of elements"),
        }
    }

    pub fn schema(&self) -> FormSchema {
        FormSchema::from_elements(&self.title, "", self.elements.clone())
    }
}

pub fn load_responses(path: &Path) -> Result<Vec<SubmissionRow>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read responses file {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid responses file {:?}", path))
}

/// A freshly created element of `element_type`, pretty-printed
pub fn element(element_type: FormElementType, label: Option<&str>) -> Result<String> {
    let mut element = ElementFactory::create(element_type);
    if let Some(label) = label {
        element = element.with_label(label);
    }
    element.column_name = Some(element.column_name());
    Ok(serde_json::to_string_pretty(&element)?)
}

pub fn element_types() -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["Type".to_string(), "Label".to_string(), "Icon".to_string()];
    header.extend(SqlDialect::all().map(|d| d.display_name().to_string()));
    table.set_header(header);

    for ty in FormElementType::all() {
        let mut row = vec![ty.id().to_string(), ty.label().to_string(), ty.icon().to_string()];
        row.extend(SqlDialect::all().map(|d| DdlGenerator::sql_type(ty, d).to_string()));
        table.add_row(row);
    }

    table.to_string()
}

fn require_table_name(table: &str) -> Result<&str> {
    let table = table.trim();
    if table.is_empty() {
        bail!("table name is required");
    }
    Ok(table)
}

fn check(form: &LoadedForm) -> Result<()> {
    let errors = form.schema().validate();
    if errors.is_empty() {
        return Ok(());
    }
    bail!("{}", describe(&errors))
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn ddl(form: &LoadedForm, table: &str, dialect: SqlDialect) -> Result<String> {
    let table = require_table_name(table)?;
    check(form)?;

    let ddl = DdlGenerator::generate_create_table(table, &form.elements, dialect);
    tracing::debug!("Generated CREATE TABLE:\n{}", ddl);
    Ok(ddl)
}

pub fn alter(
    form: &LoadedForm,
    table: &str,
    existing: &[String],
    dialect: SqlDialect,
) -> Result<String> {
    let table = require_table_name(table)?;
    check(form)?;

    let script = DdlGenerator::generate_alter_script(table, &form.elements, existing, dialect);
    tracing::debug!("Generated ALTER script:\n{}", script);
    Ok(script)
}

pub fn validate(form: &LoadedForm) -> String {
    let errors = form.schema().validate();
    if errors.is_empty() {
        format!("{} element(s), no problems found", form.elements.len())
    } else {
        describe(&errors)
    }
}

pub fn export(
    form: &LoadedForm,
    rows: &[SubmissionRow],
    out_dir: &Path,
    date_format: &str,
    date: NaiveDate,
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory: {:?}", out_dir))?;

    let exporter = CsvExporter::new(CsvOptions {
        date_format: date_format.to_string(),
        ..CsvOptions::default()
    });
    let path = exporter
        .export_to_dir(out_dir, &form.title, Some(date), &form.elements, rows)
        .context("Failed to export responses")?;
    Ok(path)
}

pub fn responses(form: &LoadedForm, rows: &[SubmissionRow], date_format: &str) -> String {
    let view = ResponseTable::build(&form.elements, rows, date_format);
    if view.is_empty() {
        return "No responses yet".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(view.headers);
    for row in view.rows {
        table.add_row(row);
    }
    table.to_string()
}

pub fn show_settings(settings: &FormzSettings) -> Result<String> {
    Ok(serde_json::to_string_pretty(settings)?)
}

pub fn set_dialect(
    settings: &mut FormzSettings,
    store: &SettingsStore,
    dialect: SqlDialect,
) -> Result<String> {
    settings.builder.default_dialect = dialect;
    store.save(settings)?;
    tracing::info!(dialect = %dialect, "default dialect changed");
    Ok(format!("Default dialect set to {}", dialect.display_name()))
}

/// The CLI has no OS appearance hint, so `System` resolves as light here
pub fn set_theme(
    settings: &mut FormzSettings,
    store: &SettingsStore,
    preference: ThemeModePreference,
) -> Result<String> {
    let mut state = ThemeState::init(settings, false);
    state.set(preference, settings, store)?;
    Ok(format!("Theme set to {}", preference.display_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use formz_core::SubmissionValue;
    use pretty_assertions::assert_eq;

    fn signup() -> LoadedForm {
        LoadedForm::parse(
            r#"{
                "title": "Event signup",
                "schema": [
                    {"id": "e1", "type": "text", "label": "Name", "required": true},
                    {"id": "e2", "type": "toggle", "label": "Newsletter"}
                ]
            }"#,
        )
        .expect("parse form")
    }

    fn row(id: &str, name: &str) -> SubmissionRow {
        let mut row = SubmissionRow {
            id: id.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            values: Default::default(),
        };
        row.values.insert("name".into(), SubmissionValue::Text(name.into()));
        row
    }

    #[test]
    fn test_parse_form_document_and_bare_list() {
        let form = signup();
        assert_eq!(form.title, "Event signup");
        assert_eq!(form.elements.len(), 2);

        let bare = LoadedForm::parse(r#"[{"id": "e1", "type": "email", "label": "Email"}]"#)
            .expect("parse list");
        assert_eq!(bare.title, "");
        assert_eq!(bare.elements[0].element_type, FormElementType::Email);

        assert!(LoadedForm::parse("42").is_err());
    }

    #[test]
    fn test_ddl_uses_dialect() {
        let ddl = ddl(&signup(), "signups", SqlDialect::Mysql).expect("ddl");
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS signups ("));
        assert!(ddl.contains("name VARCHAR(255) NOT NULL"));
        assert!(ddl.contains("newsletter BOOLEAN NULL"));
    }

    #[test]
    fn test_ddl_rejects_blank_table_and_invalid_schema() {
        assert!(ddl(&signup(), "  ", SqlDialect::Postgresql).is_err());

        let mut form = signup();
        form.elements[0].label.clear();
        assert!(ddl(&form, "signups", SqlDialect::Postgresql).is_err());
        assert!(validate(&form).contains("label"));
    }

    #[test]
    fn test_alter_adds_missing_columns() {
        let script = alter(&signup(), "signups", &["name".to_string()], SqlDialect::Postgresql)
            .expect("alter");
        assert!(script.contains("ALTER TABLE signups ADD COLUMN newsletter BOOLEAN NULL;"));
        assert!(!script.contains("DROP"));
    }

    #[test]
    fn test_element_json_has_column_name() {
        let json = element(FormElementType::Select, Some("Favourite colour")).expect("element");
        let value: Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["type"], "select");
        assert_eq!(value["columnName"], "favourite_colour");
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

        let path = export(&signup(), &[row("abc", "Ada")], dir.path(), "%Y-%m-%d", date)
            .expect("export");
        assert_eq!(path.file_name().unwrap(), "event_signup_2024-03-02.csv");

        let content = std::fs::read_to_string(&path).expect("read csv");
        assert_eq!(
            content,
            "ID,Submission date,Name,Newsletter\nabc,2024-03-01,Ada,"
        );

        assert!(export(&signup(), &[], dir.path(), "%Y-%m-%d", date).is_err());
    }

    #[test]
    fn test_responses_table() {
        assert_eq!(responses(&signup(), &[], "%Y-%m-%d"), "No responses yet");

        let out = responses(&signup(), &[row("0123456789ab", "Ada")], "%Y-%m-%d");
        assert!(out.contains("01234567..."));
        assert!(out.contains("Ada"));
        assert!(out.contains("Newsletter"));
    }

    #[test]
    fn test_settings_commands_persist() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SettingsStore::at(dir.path().join("settings.json"));
        let mut settings = FormzSettings::default();

        set_dialect(&mut settings, &store, SqlDialect::Mssql).expect("set dialect");
        set_theme(&mut settings, &store, ThemeModePreference::Dark).expect("set theme");

        let loaded = store.load().expect("load");
        assert_eq!(loaded.builder.default_dialect, SqlDialect::Mssql);
        assert_eq!(loaded.appearance.theme_mode, ThemeModePreference::Dark);
    }
}
