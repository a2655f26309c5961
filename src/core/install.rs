//! Install pipeline
//!
//! Plans the output location, picks a build strategy and runs it.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use crate::core::output::plan_output;
use crate::core::resolve::Environment;
use crate::core::strategy::{classify, BuildStrategy};
use crate::error::InstallError;
use crate::infra::toolchain::Toolchain;

/// Startup configuration passed explicitly into the pipeline
///
/// Nothing below the entry point reads process-wide state; it all comes
/// from here.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Absolute working directory
    pub cwd: PathBuf,
    /// Environment snapshot
    pub env: Environment,
    /// Directory under which remote-build workspaces are created
    pub temp_root: PathBuf,
}

impl Invocation {
    /// Capture working directory, environment and temp root of this process
    pub fn from_process() -> Result<Self, InstallError> {
        let cwd = std::env::current_dir().map_err(|source| InstallError::WorkingDir { source })?;
        Ok(Self {
            cwd,
            env: Environment::from_process(),
            temp_root: std::env::temp_dir(),
        })
    }
}

/// Derive the program name from `argv[0]`
pub fn program_name(argv0: Option<&OsStr>) -> String {
    argv0
        .and_then(|arg| Path::new(arg).file_stem())
        .map_or_else(
            || env!("CARGO_PKG_NAME").to_string(),
            |stem| stem.to_string_lossy().into_owned(),
        )
}

/// What to build and what to call it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Local path or remote module reference
    pub target: String,
    /// Bare binary name or output path
    pub name: String,
    /// Extra arguments forwarded to the build step
    pub build_args: Vec<String>,
}

impl BuildRequest {
    pub fn new(target: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            name: name.into(),
            build_args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_build_args(mut self, args: Vec<String>) -> Self {
        self.build_args = args;
        self
    }
}

/// Resolved decisions for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    /// Absolute path of the executable to write
    pub output: PathBuf,
    /// How the target will be built
    pub strategy: BuildStrategy,
}

/// Decide where the executable goes and how the target is built
pub async fn plan<T: Toolchain>(
    ctx: &CancellationToken,
    request: &BuildRequest,
    invocation: &Invocation,
    toolchain: &T,
) -> Result<InstallPlan, InstallError> {
    let output = plan_output(ctx, &request.name, &invocation.cwd, &invocation.env, toolchain).await?;
    let strategy = classify(&request.target, &invocation.cwd);
    tracing::debug!(
        "Planned {} build of {} into {}",
        strategy,
        request.target,
        output.display()
    );
    Ok(InstallPlan { output, strategy })
}

/// Build `request` and install the executable, returning the resolved plan
pub async fn install<T: Toolchain>(
    ctx: &CancellationToken,
    request: &BuildRequest,
    invocation: &Invocation,
    toolchain: &T,
) -> Result<InstallPlan, InstallError> {
    let plan = plan(ctx, request, invocation, toolchain).await?;
    plan.strategy
        .build(ctx, toolchain, request, &plan.output, invocation)
        .await?;
    tracing::info!("Installed {}", plan.output.display());
    Ok(plan)
}
