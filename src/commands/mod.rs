//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing (`mod.rs`)
//! - The `Execute` implementation and result type (`execute.rs`)
//! - The `Outputable` implementation (`output.rs`)

mod params;
mod query;
mod url;

pub use params::ParamsCmd;
pub use query::QueryCmd;
pub use url::UrlCmd;

use clap::Subcommand;
use std::error::Error;

use crate::output::{OutputFormat, Outputable};
use crate::params::Overrides;
use crate::resolver::ParamResolver;

/// Everything a command needs to resolve connection parameters.
pub struct Context {
    pub resolver: ParamResolver,
    pub overrides: Overrides,
}

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, context: &Context) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the resolved connection parameters (password redacted)
    Params(ParamsCmd),

    /// Print a postgres:// connection URL
    Url(UrlCmd),

    /// Connect and run a query, printing rows by column name
    Query(QueryCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, context: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Params(cmd) => {
                let result = cmd.execute(context)?;
                Ok(result.format(format))
            }
            Command::Url(cmd) => {
                let result = cmd.execute(context)?;
                Ok(result.format(format))
            }
            Command::Query(cmd) => {
                let result = cmd.execute(context)?;
                Ok(result.format(format))
            }
        }
    }
}
