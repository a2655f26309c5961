//! Test utilities
//!
//! A recording [`Toolchain`] fake and proptest generators.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use crate::error::ToolchainError;
use crate::infra::process::ensure_active;
use crate::infra::toolchain::Toolchain;

/// A toolchain operation observed by [`FakeToolchain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Env {
        name: String,
    },
    ModInit {
        dir: PathBuf,
        module: String,
    },
    Get {
        dir: PathBuf,
        reference: String,
    },
    Build {
        dir: PathBuf,
        package: String,
        output: PathBuf,
        args: Vec<String>,
    },
}

/// Which operation a [`FakeToolchain`] should disrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Env,
    ModInit,
    Get,
    Build,
}

/// Records every call and optionally fails or cancels one step
#[derive(Debug, Default)]
pub struct FakeToolchain {
    calls: Mutex<Vec<Call>>,
    env: HashMap<String, String>,
    fail: Option<Step>,
    cancel: Option<(Step, CancellationToken)>,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value printed by `go env NAME`
    #[must_use]
    pub fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_string(), value.to_string());
        self
    }

    /// Make `step` exit unsuccessfully
    #[must_use]
    pub fn failing(mut self, step: Step) -> Self {
        self.fail = Some(step);
        self
    }

    /// Cancel `token` while `step` is running
    #[must_use]
    pub fn cancelling(mut self, step: Step, token: CancellationToken) -> Self {
        self.cancel = Some((step, token));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn env_queries(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Env { .. }))
            .count()
    }

    fn record(&self, ctx: &CancellationToken, step: Step, call: Call) -> Result<(), ToolchainError> {
        let command = format!("{call:?}");
        ensure_active(ctx, &command)?;
        self.calls.lock().unwrap().push(call);

        if let Some((cancel_step, token)) = &self.cancel {
            if *cancel_step == step {
                token.cancel();
                return Err(ToolchainError::Cancelled { command });
            }
        }
        if self.fail == Some(step) {
            return Err(ToolchainError::Exited {
                command,
                status: failed_status(),
            });
        }
        Ok(())
    }
}

impl Toolchain for FakeToolchain {
    async fn env_var(&self, ctx: &CancellationToken, name: &str) -> Result<String, ToolchainError> {
        self.record(ctx, Step::Env, Call::Env { name: name.to_string() })?;
        Ok(self.env.get(name).map(|v| format!("{v}\n")).unwrap_or_else(|| "\n".to_string()))
    }

    async fn build(
        &self,
        ctx: &CancellationToken,
        dir: &Path,
        package: &str,
        output: &Path,
        extra_args: &[String],
    ) -> Result<(), ToolchainError> {
        self.record(
            ctx,
            Step::Build,
            Call::Build {
                dir: dir.to_path_buf(),
                package: package.to_string(),
                output: output.to_path_buf(),
                args: extra_args.to_vec(),
            },
        )
    }

    async fn get(&self, ctx: &CancellationToken, dir: &Path, reference: &str) -> Result<(), ToolchainError> {
        assert!(dir.is_dir(), "fetch must run inside an existing workspace");
        self.record(
            ctx,
            Step::Get,
            Call::Get {
                dir: dir.to_path_buf(),
                reference: reference.to_string(),
            },
        )
    }

    async fn mod_init(&self, ctx: &CancellationToken, dir: &Path, module: &str) -> Result<(), ToolchainError> {
        self.record(
            ctx,
            Step::ModInit,
            Call::ModInit {
                dir: dir.to_path_buf(),
                module: module.to_string(),
            },
        )?;
        std::fs::write(dir.join("go.mod"), format!("module {module}\n")).unwrap();
        Ok(())
    }
}

#[cfg(unix)]
fn failed_status() -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(1 << 8)
}

#[cfg(windows)]
fn failed_status() -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(1)
}

pub mod generators {
    use proptest::prelude::*;

    /// A bare binary name (no path separators)
    pub fn bare_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,20}"
    }

    /// A relative output path containing at least one separator
    pub fn relative_output() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z][a-z0-9_-]{0,10}", 1..4)
            .prop_map(|parts| format!("./{}", parts.join("/")))
    }

    /// A remote module path such as `example.com/org/tool`
    pub fn module_path() -> impl Strategy<Value = String> {
        ("[a-z]{3,10}", "[a-z]{2,4}", prop::collection::vec("[a-z][a-z0-9-]{0,10}", 1..3))
            .prop_map(|(host, tld, parts)| format!("{host}.{tld}/{}", parts.join("/")))
    }

    /// A version suffix: a semver tag or `latest`
    pub fn version() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("latest".to_string()),
            (0u32..20, 0u32..50, 0u32..100).prop_map(|(a, b, c)| format!("v{a}.{b}.{c}")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_bare_name_generator(name in bare_name()) {
            prop_assert!(!name.contains('/'));
            prop_assert!(!name.is_empty());
        }

        #[test]
        fn test_module_path_generator(path in module_path()) {
            prop_assert!(path.contains('/'));
            prop_assert!(!path.contains('@'));
        }
    }
}
