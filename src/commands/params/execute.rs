use std::error::Error;

use serde::Serialize;

use super::ParamsCmd;
use crate::commands::{Context, Execute};
use crate::db::pre_connect_command;
use crate::output::redact;

/// Resolved parameters, safe to print.
#[derive(Debug, Serialize)]
pub struct ParamsResult {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    /// `***` when a password was found, `(none)` otherwise.
    pub password: String,
    pub pre_connect: Option<String>,
}

impl Execute for ParamsCmd {
    type Output = ParamsResult;

    fn execute(self, context: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let params = context.resolver.resolve(&context.overrides)?;
        let pre_connect = pre_connect_command(&context.resolver, &context.overrides);

        Ok(ParamsResult {
            host: params.host().to_string(),
            port: params.port(),
            database: params.database().to_string(),
            user: params.user().to_string(),
            password: redact(params.password()),
            pre_connect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Overrides;
    use crate::passfile::PassFile;
    use crate::resolver::ParamResolver;
    use rstest::rstest;
    use std::fs;

    fn context(resolver: ParamResolver) -> Context {
        Context {
            resolver,
            overrides: Overrides::new()
                .set("pghost", "localhost")
                .set("pgport", 5432)
                .set("pgdatabase", "mydb")
                .set("pguser", "alice"),
        }
    }

    #[rstest]
    fn test_params_redacts_password() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "*:*:*:*:secret1\n").unwrap();
        let ctx = context(ParamResolver::empty().with_passfile(PassFile::new(file.path())));

        let result = ParamsCmd {}.execute(&ctx).unwrap();
        assert_eq!(result.host, "localhost");
        assert_eq!(result.port, 5432);
        assert_eq!(result.password, "***");
    }

    #[rstest]
    fn test_params_without_password() {
        let ctx = context(ParamResolver::empty().without_passfile());
        let result = ParamsCmd {}.execute(&ctx).unwrap();
        assert_eq!(result.password, "(none)");
        assert_eq!(result.pre_connect, None);
    }

    #[rstest]
    fn test_params_missing_fields_error() {
        let ctx = Context {
            resolver: ParamResolver::empty().without_passfile(),
            overrides: Overrides::new(),
        };
        let err = ParamsCmd {}.execute(&ctx).unwrap_err();
        assert!(err.to_string().contains("pghost"));
    }
}
