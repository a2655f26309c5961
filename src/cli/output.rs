//! Output formatting
//!
//! Status lines and error reporting. Everything goes to stderr except the
//! dry-run plan, which is meant to be consumed by scripts.

use tracing_subscriber::EnvFilter;

use crate::core::install::{BuildRequest, InstallPlan};
use crate::error::InstallError;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";
}

/// Verbosity settings from the global flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub quiet: bool,
    pub verbose: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Default log directive for these flags
    pub fn level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }

    /// Log filter: `RUST_LOG` directives on top of the flag-derived level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.level().into())
            .from_env_lossy()
    }
}

/// Print a terminal failure as `<program>: <error>`
pub fn display_error(program: &str, err: &anyhow::Error) {
    if let Some(status) = err
        .downcast_ref::<InstallError>()
        .and_then(InstallError::exit_status)
    {
        tracing::debug!("Toolchain process exited with {}", status);
    }
    eprintln!("{}", format_error(program, err));
}

/// Format a terminal failure line
pub fn format_error(program: &str, err: &anyhow::Error) -> String {
    format!("{program}: {err}")
}

/// Report a finished install
pub fn print_installed(plan: &InstallPlan) {
    eprintln!(
        "{} installed {} ({} build)",
        status::SUCCESS,
        plan.output.display(),
        plan.strategy
    );
}

/// Print a dry-run plan to stdout
pub fn print_plan(request: &BuildRequest, plan: &InstallPlan) {
    println!("target:   {}", request.target);
    println!("strategy: {}", plan.strategy);
    println!("output:   {}", plan.output.display());
    if !request.build_args.is_empty() {
        println!("args:     {}", request.build_args.join(" "));
    }
}
