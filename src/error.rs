//! Error types for gostall
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failures of a single toolchain child process
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// The process could not be started
    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully
    #[error("'{command}' exited with {status}")]
    Exited { command: String, status: ExitStatus },

    /// The execution context was cancelled before or while the process ran
    #[error("'{command}' was cancelled")]
    Cancelled { command: String },

    /// Waiting on or reading from the process failed
    #[error("failed to wait for '{command}': {source}")]
    Wait {
        command: String,
        source: std::io::Error,
    },

    /// The toolchain binary could not be located
    #[error("toolchain '{program}' not found: {source}")]
    NotFound {
        program: String,
        source: which::Error,
    },
}

impl ToolchainError {
    /// Whether the process itself never got to run
    pub fn is_start_failure(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::NotFound { .. })
    }
}

/// Errors surfaced by the install pipeline
#[derive(Error, Debug)]
pub enum InstallError {
    /// Wrong number of positional arguments
    #[error("need two positional arguments: [path] [name]")]
    Arguments,

    /// A required configuration variable is missing or empty
    #[error("{name} not set")]
    ConfigNotSet { name: String },

    /// A toolchain process could not be started, or an inspection command failed
    #[error("failed to run {operation}: {source}")]
    ExternalTool {
        operation: String,
        #[source]
        source: ToolchainError,
    },

    /// The output location could not be determined
    #[error("failed to determine output file for binary: {source}")]
    OutputPath {
        #[source]
        source: Box<InstallError>,
    },

    /// The ephemeral workspace could not be created
    #[error("failed to create build workspace: {source}")]
    WorkspaceCreation {
        #[source]
        source: std::io::Error,
    },

    /// The throwaway module manifest could not be initialized
    #[error("failed to initialize workspace module: {source}")]
    ManifestInit {
        #[source]
        source: ToolchainError,
    },

    /// Fetching a remote module failed
    #[error("failed to fetch '{target}': {source}")]
    Fetch {
        target: String,
        #[source]
        source: ToolchainError,
    },

    /// Compilation failed
    #[error("failed to build '{package}': {source}")]
    Build {
        package: String,
        #[source]
        source: ToolchainError,
    },

    /// The working directory could not be determined
    #[error("failed to resolve working directory: {source}")]
    WorkingDir {
        #[source]
        source: std::io::Error,
    },

    /// A path could not be made absolute
    #[error("failed to make '{path}' absolute")]
    RelativePath { path: PathBuf },
}

impl InstallError {
    /// Wrap a failure of the build step, distinguishing start failures
    pub fn build(package: &str, source: ToolchainError) -> Self {
        if source.is_start_failure() {
            Self::ExternalTool {
                operation: "build".to_string(),
                source,
            }
        } else {
            Self::Build {
                package: package.to_string(),
                source,
            }
        }
    }

    /// Exit status of the failed child process, if the failure came from one
    pub fn exit_status(&self) -> Option<ExitStatus> {
        let source = match self {
            Self::ExternalTool { source, .. }
            | Self::ManifestInit { source }
            | Self::Fetch { source, .. }
            | Self::Build { source, .. } => source,
            Self::OutputPath { source } => return source.exit_status(),
            _ => return None,
        };
        match source {
            ToolchainError::Exited { status, .. } => Some(*status),
            _ => None,
        }
    }
}
