//! pg_resolve library - PostgreSQL connection parameter resolution
//!
//! Resolves host, port, database, user and password from layered sources
//! (explicit overrides, environment, a JSON settings file), falls back to a
//! `.pgpass` credential file for the password, and offers name-based access
//! to query result rows.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod output;
pub mod params;
pub mod passfile;
pub mod resolver;
pub mod row;

pub use config::{ConfigError, Settings};
pub use db::{Database, DbError, Value};
pub use params::{ConnectionParams, Overrides, Param};
pub use passfile::{PassFile, PassFileError};
pub use resolver::{EnvSource, ParamResolver, ParamSource};
pub use row::{ColumnIndex, RowError, RowView};
