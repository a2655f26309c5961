//! Default configuration values

/// Toolchain binary looked up on `PATH` when no override is given
pub const DEFAULT_GO_BINARY: &str = "go";

/// Environment variable that overrides the toolchain binary
pub const ENV_GO_BINARY: &str = "GOSTALL_GO";

/// Configuration variable naming the binary install directory
pub const INSTALL_DIR_VAR: &str = "GOBIN";

/// Prefix of ephemeral remote-build workspaces
pub const WORKSPACE_PREFIX: &str = "gostall-";

/// Module name given to the throwaway manifest of a remote build
pub const WORKSPACE_MODULE: &str = "gostall.local/workspace";

/// Separates a module path from its version in a remote reference
pub const VERSION_MARKER: char = '@';
