//! Local builds
//!
//! Compiles an existing local path in place.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::error::InstallError;
use crate::infra::toolchain::Toolchain;

/// Build `target` from `cwd`, writing the executable to `output`
///
/// `build_args` are forwarded to the toolchain unchanged. A single attempt is
/// made.
pub async fn build_local<T: Toolchain>(
    ctx: &CancellationToken,
    toolchain: &T,
    cwd: &Path,
    target: &str,
    output: &Path,
    build_args: &[String],
) -> Result<(), InstallError> {
    tracing::info!("Building local package {} into {}", target, output.display());

    toolchain
        .build(ctx, cwd, target, output, build_args)
        .await
        .map_err(|e| InstallError::build(target, e))
}
