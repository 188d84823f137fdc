//! Form Designer for formz
//!
//! The schema model at the heart of the form builder and every
//! representation derived from it.
//!
//! ## Features
//!
//! - Element type registry with labels, icons and SQL types
//! - Element factory with type-specific defaults
//! - Ordered schema model (add, update, delete, move, selection)
//! - Column name derivation shared by every consumer
//! - CREATE TABLE / ALTER TABLE generation (PostgreSQL, MySQL, SQL Server)
//! - Live and design-time control rendering, drag reordering
//! - Submission value store
//!
//! ## Usage
//!
//! ```rust
//! use formz_designer::{DdlGenerator, ElementFactory, FormElementType, FormSchema, SqlDialect};
//!
//! let mut schema = FormSchema::new("Signup", "");
//! schema.add(ElementFactory::create(FormElementType::Number).with_label("Age").required());
//!
//! let ddl = DdlGenerator::generate_create_table("signups", schema.elements(), SqlDialect::Postgresql);
//! assert!(ddl.contains("age NUMERIC NOT NULL"));
//! ```

pub mod drag;
pub mod events;
pub mod models;
pub mod render;
pub mod service;
pub mod submission;

// Re-exports for convenience
pub use drag::{DragController, DragState, HoverPosition, Reorder};
pub use events::FormBuilderEvent;
pub use formz_core::SqlDialect;
pub use models::{
    ColumnMap, ElementFactory, ElementValidation, FormElement, FormElementOption,
    FormElementType, FormSchema, PRIMARY_KEY_COLUMN, ValidationError, derive_column_name,
    option_value_for,
};
pub use render::{
    Control, ControlEvent, RenderedControl, render_control, render_form, render_preview,
    render_preview_form,
};
pub use service::DdlGenerator;
pub use submission::SubmissionValues;
