mod execute;
mod output;

pub use execute::UrlResult;

use clap::Args;

/// Print a postgres:// connection URL for the resolved parameters
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_resolve url                    # Password shown as ***
  pg_resolve url --show-password    # Usable connection URL")]
pub struct UrlCmd {
    /// Include the password in clear text
    #[arg(long, default_value_t = false)]
    pub show_password: bool,
}
