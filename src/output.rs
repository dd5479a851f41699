//! Output formatting for command results.
//!
//! Supports two output formats: table (human-readable) and JSON.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Trait for types that can be formatted for output
pub trait Outputable: Serialize {
    /// Format as a human-readable table
    fn to_table(&self) -> String;

    /// Format according to the specified output format
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }
}

/// Display form of an optional secret.
pub fn redact(secret: Option<&str>) -> String {
    match secret {
        Some(_) => "***".to_string(),
        None => "(none)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
    }

    impl Outputable for Sample {
        fn to_table(&self) -> String {
            format!("name: {}", self.name)
        }
    }

    #[rstest]
    fn test_format_table() {
        assert_eq!(Sample { name: "x" }.format(OutputFormat::Table), "name: x");
    }

    #[rstest]
    fn test_format_json() {
        let json = Sample { name: "x" }.format(OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "x");
    }

    #[rstest]
    #[case(Some("hunter2"), "***")]
    #[case(None, "(none)")]
    fn test_redact(#[case] secret: Option<&str>, #[case] expected: &str) {
        assert_eq!(redact(secret), expected);
    }
}
