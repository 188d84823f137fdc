//! External database connection descriptors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SqlDialect;

/// A saved external database a form table can be published to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub dialect: SqlDialect,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl DatabaseConnection {
    /// Create an unsaved descriptor using the dialect's default port
    pub fn new(name: impl Into<String>, dialect: SqlDialect) -> Self {
        Self {
            id: None,
            name: name.into(),
            dialect,
            host: "localhost".to_string(),
            port: dialect.default_port(),
            database: String::new(),
            username: String::new(),
            password: String::new(),
            created_at: None,
        }
    }

    /// Builder: set host and port
    pub fn at(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Builder: set database name
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Builder: set credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Human readable target, never including the password
    pub fn summary(&self) -> String {
        format!(
            "{} ({}@{}:{}/{})",
            self.name,
            self.username,
            self.host,
            self.port,
            self.database
        )
    }
}
