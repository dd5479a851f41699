//! Pre-connect hook, typically used to bring up a VPN before connecting.

use std::process::Command;

use super::DbError;
use crate::params::Overrides;
use crate::resolver::ParamResolver;

/// Name of the hook key, prefixed like the connection parameters
/// (`pgvpncmd`, `PGVPNCMD` in the environment).
pub const PRE_CONNECT_NAME: &str = "vpncmd";

/// Lower-case lookup key of the hook command for a key prefix.
pub fn pre_connect_key(prefix: &str) -> String {
    format!("{}{}", prefix, PRE_CONNECT_NAME).to_lowercase()
}

/// The hook command configured for `resolver`, if any. Blank commands count
/// as unset.
pub fn pre_connect_command(resolver: &ParamResolver, overrides: &Overrides) -> Option<String> {
    resolver
        .lookup(overrides, &pre_connect_key(resolver.key_prefix()))
        .filter(|command| !command.trim().is_empty())
}

/// Run `command` through the platform shell and wait for it.
///
/// The exit status is only logged; a hook that fails to spawn is an error.
pub fn run_pre_connect(command: &str) -> Result<(), DbError> {
    tracing::debug!("starting pre-connect hook");

    let status = shell(command).status().map_err(|e| DbError::Hook {
        message: e.to_string(),
    })?;

    if !status.success() {
        tracing::warn!(%status, "pre-connect hook exited unsuccessfully, connecting anyway");
    }
    Ok(())
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(not(unix))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
