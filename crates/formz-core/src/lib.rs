//! formz Core - Core abstractions shared by every formz crate
//!
//! This crate defines:
//!
//! - `SqlDialect` / `DialectInfo` - the three SQL targets forms can be published to
//! - `SubmissionValue` - the tagged union stored for every answered field
//! - `RowStore` - the opaque persistence collaborator (row CRUD + procedures)
//! - `SqlExecutor` - the remote "run this DDL on that database" collaborator
//! - `DatabaseConnection` - descriptor of an external database
//! - `FormzError` / `Result`

mod connection;
mod dialect;
mod error;
mod store;
mod types;

pub use connection::*;
pub use dialect::*;
pub use error::*;
pub use store::*;
pub use types::*;
