//! formz command line
//!
//! Offline access to the form builder: create elements, generate table DDL
//! for a saved form, and export or inspect its responses.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use formz_core::SqlDialect;
use formz_designer::FormElementType;
use formz_settings::{FormzSettings, SettingsStore, ThemeModePreference, exports_dir};

mod commands;
mod logging;

use commands::LoadedForm;

#[derive(Parser)]
#[command(name = "formz", version, about = "Form builder schema and response tooling")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Settings file to use instead of the default location
    #[arg(long, env = "FORMZ_SETTINGS", global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a new element of the given type as JSON
    Element {
        #[arg(value_parser = parse_element_type)]
        element_type: FormElementType,
        /// Label instead of the type's default
        #[arg(long)]
        label: Option<String>,
    },
    /// List element types with their SQL column types
    Types,
    /// Check a form schema for problems
    Validate {
        #[arg(long)]
        schema: PathBuf,
    },
    /// Generate CREATE TABLE for a form
    Ddl {
        /// Form document or JSON array of elements
        #[arg(long)]
        schema: PathBuf,
        #[arg(long)]
        table: String,
        /// Defaults to the dialect in settings
        #[arg(long, value_parser = parse_dialect)]
        dialect: Option<SqlDialect>,
    },
    /// Generate ALTER TABLE statements syncing an existing table
    Alter {
        #[arg(long)]
        schema: PathBuf,
        #[arg(long)]
        table: String,
        #[arg(long, value_parser = parse_dialect)]
        dialect: Option<SqlDialect>,
        /// Columns the table already has
        #[arg(long, value_delimiter = ',')]
        existing: Vec<String>,
    },
    /// Export responses to a CSV file
    Export {
        #[arg(long)]
        form: PathBuf,
        /// JSON array of submissions
        #[arg(long)]
        responses: PathBuf,
        /// Output directory, the downloads folder by default
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show responses as a table
    Responses {
        #[arg(long)]
        form: PathBuf,
        #[arg(long)]
        responses: PathBuf,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show,
    /// Print the settings file location
    Path,
    /// Set the default SQL dialect
    Dialect {
        #[arg(value_parser = parse_dialect)]
        dialect: SqlDialect,
    },
    /// Set the theme preference (light, dark, system)
    Theme {
        #[arg(value_parser = parse_theme)]
        preference: ThemeModePreference,
    },
}

fn parse_element_type(s: &str) -> Result<FormElementType, String> {
    FormElementType::from_id(s).ok_or_else(|| {
        let known: Vec<_> = FormElementType::all().map(|t| t.id()).collect();
        format!("unknown element type '{}', expected one of: {}", s, known.join(", "))
    })
}

fn parse_dialect(s: &str) -> Result<SqlDialect, String> {
    SqlDialect::parse(s).ok_or_else(|| format!("unknown dialect '{}'", s))
}

fn parse_theme(s: &str) -> Result<ThemeModePreference, String> {
    ThemeModePreference::all()
        .iter()
        .copied()
        .find(|p| p.display_name().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown theme '{}'", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&logging::LoggingConfig::from_verbosity(cli.verbose, cli.log_json));

    let store = match cli.settings {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::default_location()?,
    };
    let mut settings = store.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load settings, using defaults");
        FormzSettings::default()
    });

    let output = match cli.command {
        Commands::Element {
            element_type,
            label,
        } => commands::element(element_type, label.as_deref())?,
        Commands::Types => commands::element_types(),
        Commands::Validate { schema } => commands::validate(&LoadedForm::load(&schema)?),
        Commands::Ddl {
            schema,
            table,
            dialect,
        } => {
            let dialect = dialect.unwrap_or(settings.builder.default_dialect);
            commands::ddl(&LoadedForm::load(&schema)?, &table, dialect)?
        }
        Commands::Alter {
            schema,
            table,
            dialect,
            existing,
        } => {
            let dialect = dialect.unwrap_or(settings.builder.default_dialect);
            commands::alter(&LoadedForm::load(&schema)?, &table, &existing, dialect)?
        }
        Commands::Export {
            form,
            responses,
            out,
        } => {
            let out = match out {
                Some(dir) => dir,
                None => exports_dir()?,
            };
            let path = commands::export(
                &LoadedForm::load(&form)?,
                &commands::load_responses(&responses)?,
                &out,
                &settings.export.date_format,
                chrono::Local::now().date_naive(),
            )?;
            format!("Exported to {}", path.display())
        }
        Commands::Responses { form, responses } => commands::responses(
            &LoadedForm::load(&form)?,
            &commands::load_responses(&responses)?,
            &settings.export.date_format,
        ),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::show_settings(&settings)?,
            ConfigAction::Path => store.path().display().to_string(),
            ConfigAction::Dialect { dialect } => {
                commands::set_dialect(&mut settings, &store, dialect)?
            }
            ConfigAction::Theme { preference } => {
                commands::set_theme(&mut settings, &store, preference)?
            }
        },
    };

    println!("{}", output);
    Ok(())
}
