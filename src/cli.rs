//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use crate::commands::{Command, Context};
use crate::config::Settings;
use crate::output::OutputFormat;
use crate::params::{DEFAULT_KEY_PREFIX, Overrides};
use crate::passfile::PassFile;
use crate::resolver::ParamResolver;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file (default: $PG_RESOLVE_CONFIG, then ./.pg_resolve.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override a parameter, e.g. `--set pghost=db.example.org` (repeatable)
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment, global = true)]
    pub overrides: Vec<(String, String)>,

    /// Prefix of the lookup keys (`pg` gives pghost/PGHOST)
    #[arg(long, default_value = DEFAULT_KEY_PREFIX, global = true)]
    pub key_prefix: String,

    /// Credential file to use instead of $PGPASSFILE or ~/.pgpass
    #[arg(long, global = true)]
    pub passfile: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Build the resolution context and run the selected command.
    pub fn run(self) -> Result<String, Box<dyn Error>> {
        let settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::discover()?,
        };

        let mut resolver = ParamResolver::new(settings).with_key_prefix(self.key_prefix);
        if let Some(path) = self.passfile {
            resolver = resolver.with_passfile(PassFile::new(path));
        }

        let context = Context {
            resolver,
            overrides: self.overrides.into_iter().collect::<Overrides>(),
        };

        self.command.run(&context, self.format)
    }
}

/// Parse a `key=value` override. Keys are lower-cased to match lookup keys.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_lowercase(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pghost=db1", ("pghost", "db1"))]
    #[case("PGHOST=db1", ("pghost", "db1"))]
    #[case("pgpassword=a=b", ("pgpassword", "a=b"))]
    #[case("pguser=", ("pguser", ""))]
    fn test_parse_assignment(#[case] input: &str, #[case] expected: (&str, &str)) {
        let (key, value) = parse_assignment(input).unwrap();
        assert_eq!((key.as_str(), value.as_str()), expected);
    }

    #[rstest]
    #[case("pghost")]
    #[case("=value")]
    #[case(" =value")]
    fn test_parse_assignment_rejects(#[case] input: &str) {
        assert!(parse_assignment(input).is_err());
    }

    #[rstest]
    fn test_global_args() {
        let args = Args::try_parse_from([
            "pg_resolve",
            "params",
            "--set",
            "pghost=db1",
            "-s",
            "pgport=5433",
            "--key-prefix",
            "",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(
            args.overrides,
            vec![
                ("pghost".to_string(), "db1".to_string()),
                ("pgport".to_string(), "5433".to_string())
            ]
        );
        assert_eq!(args.key_prefix, "");
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[rstest]
    fn test_defaults() {
        let args = Args::try_parse_from(["pg_resolve", "params"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.overrides.is_empty());
        assert_eq!(args.key_prefix, "pg");
        assert!(args.passfile.is_none());
        assert_eq!(args.format, OutputFormat::Table);
    }

    #[rstest]
    fn test_requires_subcommand() {
        assert!(Args::try_parse_from(["pg_resolve"]).is_err());
    }
}
