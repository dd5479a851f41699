//! PostgreSQL connection glue.
//!
//! `Database` ties the pieces together for a calling application:
//! - resolve connection parameters once
//! - run the optional pre-connect hook (`PGVPNCMD` with the default prefix)
//! - connect through the synchronous `postgres` client
//! - wrap fetched rows in [`RowView`]s
//!
//! The client itself (sockets, SQL, transactions) is the `postgres` crate's
//! business. There is no pooling and no reconnect logic.

mod conversion;
mod hook;
mod value;

pub use conversion::{rows_to_views, simple_rows_to_views};
pub use hook::{PRE_CONNECT_NAME, pre_connect_command, pre_connect_key, run_pre_connect};
pub use value::Value;

use postgres::{Client, NoTls};
use thiserror::Error;

use crate::config::ConfigError;
use crate::params::{ConnectionParams, Overrides};
use crate::resolver::ParamResolver;
use crate::row::{RowError, RowView};

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Row(#[from] RowError),

    #[error("Cannot connect to database server: {0}")]
    Connect(#[source] postgres::Error),

    #[error("Query failed: {0}")]
    Query(#[source] postgres::Error),

    #[error("Failed to run pre-connect hook: {message}")]
    Hook { message: String },

    #[error("Not connected to a database")]
    NotConnected,
}

/// Build the client configuration for a set of resolved parameters.
pub fn pg_config(params: &ConnectionParams) -> postgres::Config {
    let mut config = postgres::Config::new();
    config
        .host(params.host())
        .port(params.port())
        .dbname(params.database())
        .user(params.user());
    if let Some(password) = params.password() {
        config.password(password);
    }
    config
}

/// A single PostgreSQL connection built from resolved parameters.
pub struct Database {
    params: ConnectionParams,
    pre_connect: Option<String>,
    client: Option<Client>,
}

impl Database {
    /// Resolve parameters and the pre-connect hook. Does not connect.
    ///
    /// # Errors
    /// Returns `DbError::Config` if the parameters cannot be resolved.
    pub fn new(resolver: &ParamResolver, overrides: &Overrides) -> Result<Self, DbError> {
        let params = resolver.resolve(overrides)?;
        let pre_connect = pre_connect_command(resolver, overrides);

        Ok(Self {
            params,
            pre_connect,
            client: None,
        })
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// The configured pre-connect hook command, if any.
    pub fn pre_connect(&self) -> Option<&str> {
        self.pre_connect.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Run the pre-connect hook, then open the connection.
    pub fn connect(&mut self) -> Result<(), DbError> {
        if let Some(command) = &self.pre_connect {
            run_pre_connect(command)?;
        }

        tracing::debug!("connecting to database");
        let client = pg_config(&self.params).connect(NoTls).map_err(|e| {
            tracing::error!(
                host = %self.params.host(),
                database = %self.params.database(),
                "cannot connect to database server: {}",
                e
            );
            DbError::Connect(e)
        })?;

        tracing::info!(
            host = %self.params.host(),
            database = %self.params.database(),
            "connected"
        );
        self.client = Some(client);
        Ok(())
    }

    /// The underlying client, for transactions and parameterized queries.
    pub fn client(&mut self) -> Result<&mut Client, DbError> {
        self.client.as_mut().ok_or(DbError::NotConnected)
    }

    /// Run a query and wrap every row in a typed [`RowView`].
    pub fn query(&mut self, sql: &str) -> Result<Vec<RowView<Value>>, DbError> {
        let rows = self.client()?.query(sql, &[]).map_err(DbError::Query)?;
        Ok(rows_to_views(&rows)?)
    }

    /// Run a query over the simple protocol; every value arrives as text.
    pub fn query_text(&mut self, sql: &str) -> Result<Vec<RowView<Option<String>>>, DbError> {
        let messages = self.client()?.simple_query(sql).map_err(DbError::Query)?;
        Ok(simple_rows_to_views(&messages))
    }

    /// Drop the connection. Parameters are kept, so `connect` may be called again.
    pub fn close(&mut self) {
        if self.client.take().is_some() {
            tracing::debug!("connection closed");
        }
    }
}
