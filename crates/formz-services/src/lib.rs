//! formz Services Layer
//!
//! The layer between a form-builder UI and the two external collaborators:
//! the hosted row store and the remote SQL bridge. Services validate, call
//! the collaborators and hand back view models; they never touch UI types.
//!
//! # Architecture
//!
//! ```text
//! UI host
//!     ↓
//! Service Layer (formz-services) ← This crate
//!     ↓
//! Domain Layer (formz-designer)
//!     ↓
//! Collaborators (formz-core::RowStore, formz-core::SqlExecutor)
//! ```
//!
//! # Services
//!
//! - [`FormService`] - Save, publish, list and delete forms
//! - [`SubmissionService`] - Store and read back responses
//! - [`ConnectionService`] - Saved external database connections
//! - [`ExternalFormService`] - Create and sync a form's table in an external database
//!
//! Every service holds its collaborators as `Arc<dyn ...>`; nothing here
//! retries, caches or cancels an in-flight call.

mod busy;
mod connection_service;
mod error;
mod external_form_service;
mod form_service;
mod procedure_executor;
mod submission_service;
mod view_models;

pub use busy::{BusyFlag, BusyGuard};
pub use connection_service::{CONNECTIONS_TABLE, ConnectionService, TEST_CONNECTION_PROCEDURE};
pub use error::{ServiceError, ServiceResult};
pub use external_form_service::ExternalFormService;
pub use form_service::{FORMS_TABLE, FormService, generate_table_name};
pub use procedure_executor::{EXECUTE_SQL_PROCEDURE, ProcedureSqlExecutor};
pub use submission_service::{DATA_TABLE, SubmissionService};
pub use view_models::{FormData, FormDraft};

// Re-export the collaborator contracts so hosts only need this crate
pub use formz_core::{DatabaseConnection, ExecutionOutcome, Filter, Row, RowStore, SqlExecutor};
