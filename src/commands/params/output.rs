//! Output formatting for params command results.

use super::execute::ParamsResult;
use crate::output::Outputable;

impl Outputable for ParamsResult {
    fn to_table(&self) -> String {
        let mut lines = vec![
            format!("host:     {}", self.host),
            format!("port:     {}", self.port),
            format!("database: {}", self.database),
            format!("user:     {}", self.user),
            format!("password: {}", self.password),
        ];
        if let Some(command) = &self.pre_connect {
            lines.push(format!("pre-connect: {}", command));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use rstest::{fixture, rstest};

    #[fixture]
    fn result() -> ParamsResult {
        ParamsResult {
            host: "localhost".to_string(),
            port: 5432,
            database: "mydb".to_string(),
            user: "alice".to_string(),
            password: "***".to_string(),
            pre_connect: None,
        }
    }

    #[rstest]
    fn test_to_table(result: ParamsResult) {
        let expected = "\
host:     localhost
port:     5432
database: mydb
user:     alice
password: ***";
        assert_eq!(result.to_table(), expected);
    }

    #[rstest]
    fn test_to_table_with_pre_connect(mut result: ParamsResult) {
        result.pre_connect = Some("vpn up".to_string());
        assert!(result.to_table().ends_with("pre-connect: vpn up"));
    }

    #[rstest]
    fn test_json(result: ParamsResult) {
        let json: serde_json::Value =
            serde_json::from_str(&result.format(OutputFormat::Json)).unwrap();
        assert_eq!(json["port"], 5432);
        assert_eq!(json["password"], "***");
    }
}
