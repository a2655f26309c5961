//! Toolchain management
//!
//! Handles Go toolchain discovery and invocation.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::config::defaults::DEFAULT_GO_BINARY;
use crate::error::ToolchainError;
use crate::infra::process::{run_captured, run_inherited};

/// Operations the install pipeline needs from the Go toolchain
///
/// Every operation runs as a child process bound to `ctx`: it is never
/// started once `ctx` is cancelled and is killed if `ctx` fires while it runs.
#[allow(async_fn_in_trait)]
pub trait Toolchain {
    /// Print a configuration variable (`go env NAME`), returning raw stdout
    async fn env_var(&self, ctx: &CancellationToken, name: &str) -> Result<String, ToolchainError>;

    /// Compile `package` inside `dir` and write the executable to `output`
    async fn build(
        &self,
        ctx: &CancellationToken,
        dir: &Path,
        package: &str,
        output: &Path,
        extra_args: &[String],
    ) -> Result<(), ToolchainError>;

    /// Add a module reference to the manifest in `dir` (`go get REF`)
    async fn get(
        &self,
        ctx: &CancellationToken,
        dir: &Path,
        reference: &str,
    ) -> Result<(), ToolchainError>;

    /// Create a minimal module manifest in `dir` (`go mod init NAME`)
    async fn mod_init(
        &self,
        ctx: &CancellationToken,
        dir: &Path,
        module: &str,
    ) -> Result<(), ToolchainError>;
}

/// Go toolchain wrapper
#[derive(Debug, Clone)]
pub struct GoToolchain {
    /// Path to go binary
    go_path: PathBuf,
}

impl GoToolchain {
    /// Create a new Go toolchain wrapper
    pub fn new(go_path: PathBuf) -> Self {
        Self { go_path }
    }

    /// Locate the toolchain binary
    ///
    /// An explicit path (from `--go` or `GOSTALL_GO`) is checked as given;
    /// otherwise `go` is searched on `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ToolchainError> {
        let program = explicit.map_or_else(|| PathBuf::from(DEFAULT_GO_BINARY), Path::to_path_buf);
        let go_path = which::which(&program).map_err(|source| ToolchainError::NotFound {
            program: program.display().to_string(),
            source,
        })?;
        Ok(Self::new(go_path))
    }

    /// Get the path to the go binary
    pub fn go_path(&self) -> &Path {
        &self.go_path
    }

    fn command(&self, dir: &Path) -> Command {
        let mut command = Command::new(&self.go_path);
        command.current_dir(dir);
        command
    }
}

impl Toolchain for GoToolchain {
    async fn env_var(&self, ctx: &CancellationToken, name: &str) -> Result<String, ToolchainError> {
        let mut command = Command::new(&self.go_path);
        command.arg("env").arg(name);
        run_captured(command, ctx).await
    }

    async fn build(
        &self,
        ctx: &CancellationToken,
        dir: &Path,
        package: &str,
        output: &Path,
        extra_args: &[String],
    ) -> Result<(), ToolchainError> {
        let mut command = self.command(dir);
        command
            .arg("build")
            .arg("-o")
            .arg(output)
            .args(extra_args)
            .arg(package);
        run_inherited(command, ctx).await
    }

    async fn get(
        &self,
        ctx: &CancellationToken,
        dir: &Path,
        reference: &str,
    ) -> Result<(), ToolchainError> {
        let mut command = self.command(dir);
        command.arg("get").arg(reference);
        run_inherited(command, ctx).await
    }

    async fn mod_init(
        &self,
        ctx: &CancellationToken,
        dir: &Path,
        module: &str,
    ) -> Result<(), ToolchainError> {
        let mut command = self.command(dir);
        command.args(["mod", "init"]).arg(module);
        run_inherited(command, ctx).await
    }
}
