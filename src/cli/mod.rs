//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::defaults::{ENV_GO_BINARY, INSTALL_DIR_VAR};
use crate::core::install::{self, BuildRequest, Invocation};
use crate::error::InstallError;
use crate::infra::signal::cancel_on_signals;
use crate::infra::toolchain::GoToolchain;

/// Gostall - build a Go executable under any name you want
///
/// Compiles TARGET (a local path or a remote `module@version` reference) and
/// installs it as NAME. A bare NAME lands in GOBIN; a NAME containing a path
/// separator is written exactly there.
#[derive(Parser, Debug)]
#[command(name = "gostall")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Go toolchain binary to use
    #[arg(long, value_name = "PATH", env = ENV_GO_BINARY)]
    pub go: Option<PathBuf>,

    /// Install directory for bare names, overriding GOBIN
    #[arg(long, value_name = "DIR")]
    pub gobin: Option<PathBuf>,

    /// Print the resolved output path and build strategy without building
    #[arg(long)]
    pub dry_run: bool,

    /// TARGET (local path or module@version) and NAME (binary name, or output
    /// path when it contains a path separator)
    #[arg(value_name = "TARGET NAME")]
    pub args: Vec<String>,

    /// Extra arguments forwarded to `go build` (after `--`)
    #[arg(last = true, value_name = "BUILD_ARGS")]
    pub build_args: Vec<String>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self, mut invocation: Invocation) -> Result<()> {
        let (target, name) = match <[String; 2]>::try_from(self.args) {
            Ok([target, name]) => (target, name),
            Err(args) if args.len() == 1 && args[0] == "version" => {
                println!("{}", version_string());
                return Ok(());
            }
            Err(_) => return Err(InstallError::Arguments.into()),
        };

        if let Some(dir) = &self.gobin {
            invocation
                .env
                .set(INSTALL_DIR_VAR, &dir.to_string_lossy());
        }

        let toolchain = GoToolchain::locate(self.go.as_deref()).map_err(|source| {
            InstallError::ExternalTool {
                operation: "go".to_string(),
                source,
            }
        })?;
        tracing::debug!("Using Go toolchain at {}", toolchain.go_path().display());

        let (ctx, _signals) = cancel_on_signals()?;
        let request = BuildRequest::new(target, name).with_build_args(self.build_args);

        if self.dry_run {
            let plan = install::plan(&ctx, &request, &invocation, &toolchain).await?;
            output::print_plan(&request, &plan);
            return Ok(());
        }

        let plan = install::install(&ctx, &request, &invocation, &toolchain).await?;
        if !self.quiet {
            output::print_installed(&plan);
        }
        Ok(())
    }
}

/// Version line printed by `gostall version`
pub fn version_string() -> String {
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if !sha.is_empty() && sha != "VERGEN_IDEMPOTENT_OUTPUT" => {
            format!("gostall {} ({sha})", env!("CARGO_PKG_VERSION"))
        }
        _ => format!("gostall {}", env!("CARGO_PKG_VERSION")),
    }
}
