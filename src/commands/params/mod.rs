mod execute;
mod output;

pub use execute::ParamsResult;

use clap::Args;

/// Show the resolved connection parameters
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_resolve params                          # Resolve from environment and settings
  pg_resolve params --set pghost=db1         # Override the host
  pg_resolve params --format json            # Machine-readable output")]
pub struct ParamsCmd {}
