//! Service layer for the form designer
//!
//! Provides DDL generation for form schemas.

mod ddl_generator;

pub use ddl_generator::DdlGenerator;
