//! Output path planning
//!
//! A name containing a path separator is a caller-chosen path; anything else
//! is a bare binary name placed in the install directory (`GOBIN`). The
//! decision is purely syntactic and never probes the filesystem.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use crate::config::defaults::INSTALL_DIR_VAR;
use crate::core::resolve::{resolve_var, Environment};
use crate::error::InstallError;
use crate::infra::filesystem::absolutize;
use crate::infra::toolchain::Toolchain;

/// Whether `name` contains a path separator for the current platform
pub fn has_separator(name: &str) -> bool {
    name.chars().any(std::path::is_separator)
}

/// Resolve the absolute location the executable must be written to
pub async fn plan_output<T: Toolchain>(
    ctx: &CancellationToken,
    name: &str,
    cwd: &Path,
    env: &Environment,
    toolchain: &T,
) -> Result<PathBuf, InstallError> {
    let location = if has_separator(name) {
        absolutize(cwd, Path::new(name))
    } else {
        let install_dir = resolve_var(ctx, env, toolchain, INSTALL_DIR_VAR)
            .await
            .map_err(|e| InstallError::OutputPath {
                source: Box::new(e),
            })?;
        absolutize(cwd, &Path::new(&install_dir).join(name))
    };

    if !location.is_absolute() {
        return Err(InstallError::RelativePath { path: location });
    }
    Ok(location)
}
