mod execute;
mod output;

pub use execute::QueryResult;

use clap::Args;

/// Connect and run a SQL query
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_resolve query 'SELECT version()'
  pg_resolve query 'SELECT pk, title FROM books LIMIT 5' --format json")]
pub struct QueryCmd {
    /// SQL to run (simple protocol; every value is printed as text)
    pub sql: String,
}
