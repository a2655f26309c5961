//! Configuration variable resolution
//!
//! A variable set in the environment snapshot wins; otherwise the toolchain's
//! own configuration store is queried with `go env NAME`.

use std::collections::HashMap;
use std::ffi::OsString;

use tokio_util::sync::CancellationToken;

use crate::error::InstallError;
use crate::infra::toolchain::Toolchain;

/// Snapshot of environment variables taken once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value): (OsString, OsString)| {
                Some((key.into_string().ok()?, value.into_string().ok()?))
            })
            .collect()
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Set or replace a variable in the snapshot
    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Resolve a configuration variable
///
/// Spawns exactly one `go env` process when the environment has no
/// non-empty value for `name`.
pub async fn resolve_var<T: Toolchain>(
    ctx: &CancellationToken,
    env: &Environment,
    toolchain: &T,
    name: &str,
) -> Result<String, InstallError> {
    if let Some(value) = env.get(name).filter(|value| !value.is_empty()) {
        tracing::debug!("{name} taken from environment: {value}");
        return Ok(value.to_string());
    }

    let output = toolchain
        .env_var(ctx, name)
        .await
        .map_err(|source| InstallError::ExternalTool {
            operation: format!("go env {name}"),
            source,
        })?;

    let value = output.trim();
    if value.is_empty() {
        return Err(InstallError::ConfigNotSet {
            name: name.to_string(),
        });
    }

    tracing::debug!("{name} taken from toolchain configuration: {value}");
    Ok(value.to_string())
}
