//! Build strategy selection
//!
//! A target naming an existing filesystem entry is built in place; anything
//! else is treated as a remote module reference.

use std::fmt;
use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::core::install::{BuildRequest, Invocation};
use crate::core::{local, remote};
use crate::error::InstallError;
use crate::infra::filesystem;
use crate::infra::toolchain::Toolchain;

/// How a target gets compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStrategy {
    /// Build directly from an existing local path
    Local,
    /// Fetch into a disposable workspace, then build there
    Remote,
}

/// Classify `target` by probing the filesystem relative to `cwd`
///
/// Existence is the only criterion. A remote reference that happens to match
/// a local file or directory name is classified [`BuildStrategy::Local`].
/// An empty target never names an entry.
pub fn classify(target: &str, cwd: &Path) -> BuildStrategy {
    if !target.is_empty() && filesystem::exists(&cwd.join(target)) {
        BuildStrategy::Local
    } else {
        BuildStrategy::Remote
    }
}

impl BuildStrategy {
    /// Build the request's target and write the executable to `output`
    pub async fn build<T: Toolchain>(
        self,
        ctx: &CancellationToken,
        toolchain: &T,
        request: &BuildRequest,
        output: &Path,
        invocation: &Invocation,
    ) -> Result<(), InstallError> {
        let BuildRequest {
            target, build_args, ..
        } = request;
        match self {
            Self::Local => {
                local::build_local(ctx, toolchain, &invocation.cwd, target, output, build_args)
                    .await
            }
            Self::Remote => {
                remote::build_remote(ctx, toolchain, &invocation.temp_root, target, output, build_args)
                    .await
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for BuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
