//! Remote builds
//!
//! A remote module reference is built from a throwaway workspace:
//!
//! 1. create an empty, uniquely named directory
//! 2. `go mod init` a placeholder module in it
//! 3. `go get` the full reference (version included)
//! 4. `go build` the base import path (version stripped)
//!
//! The steps run strictly in order and stop at the first failure. The
//! workspace is removed when the [`Workspace`] guard drops, on every exit path.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use crate::config::defaults::{VERSION_MARKER, WORKSPACE_MODULE, WORKSPACE_PREFIX};
use crate::error::InstallError;
use crate::infra::process::ensure_active;
use crate::infra::toolchain::Toolchain;

/// Exclusively owned build directory, removed on drop
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl Workspace {
    /// Create a fresh empty directory under `root`
    pub fn create_in(root: &Path) -> Result<Self, InstallError> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(root)
            .map_err(|source| InstallError::WorkspaceCreation { source })?;

        let path = dir.path().to_path_buf();
        tracing::debug!("Created workspace {}", path.display());
        Ok(Self {
            path,
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => tracing::debug!("Removed workspace {}", self.path.display()),
                Err(e) => tracing::warn!(
                    "Failed to remove workspace {}: {}",
                    self.path.display(),
                    e
                ),
            }
        }
    }
}

/// Strip the version suffix from a module reference
///
/// Splits at the first version marker: `example.com/tool@v1.2.3` becomes
/// `example.com/tool`. References without a marker are returned unchanged.
pub fn base_path(target: &str) -> &str {
    target
        .split_once(VERSION_MARKER)
        .map_or(target, |(base, _)| base)
}

/// Module name for the workspace manifest, never equal to `base`
pub fn workspace_module(base: &str) -> String {
    let mut module = WORKSPACE_MODULE.to_string();
    let mut suffix = 1;
    while module == base {
        suffix += 1;
        module = format!("{WORKSPACE_MODULE}{suffix}");
    }
    module
}

/// Fetch and build a remote module reference
pub async fn build_remote<T: Toolchain>(
    ctx: &CancellationToken,
    toolchain: &T,
    temp_root: &Path,
    target: &str,
    output: &Path,
    build_args: &[String],
) -> Result<(), InstallError> {
    let base = base_path(target);
    let module = workspace_module(base);

    ensure_active(ctx, "create workspace").map_err(|source| InstallError::ExternalTool {
        operation: "remote build".to_string(),
        source,
    })?;
    let workspace = Workspace::create_in(temp_root)?;
    let dir = workspace.path();

    tracing::info!("Initializing workspace module in {}", dir.display());
    ensure_active(ctx, "go mod init")
        .map_err(|source| InstallError::ManifestInit { source })?;
    toolchain
        .mod_init(ctx, dir, &module)
        .await
        .map_err(|source| InstallError::ManifestInit { source })?;

    tracing::info!("Fetching {target}");
    ensure_active(ctx, "go get").map_err(|source| InstallError::Fetch {
        target: target.to_string(),
        source,
    })?;
    toolchain
        .get(ctx, dir, target)
        .await
        .map_err(|source| InstallError::Fetch {
            target: target.to_string(),
            source,
        })?;

    tracing::info!("Building {} into {}", base, output.display());
    ensure_active(ctx, "go build").map_err(|e| InstallError::build(base, e))?;
    toolchain
        .build(ctx, dir, base, output, build_args)
        .await
        .map_err(|e| InstallError::build(base, e))?;

    Ok(())
}
