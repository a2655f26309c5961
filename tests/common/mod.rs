//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests: a temporary
//! project layout and a fake `go` toolchain that logs every invocation.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Shell script standing in for the Go toolchain
///
/// Each call appends `<cwd>|<args>` to `$FAKE_GO_LOG`. `$FAKE_GO_FAIL` names a
/// subcommand that should exit 1, `$FAKE_GO_ENV_GOBIN` is what `go env`
/// prints and `$FAKE_GO_GET_SLEEP` makes `go get` hang.
pub const FAKE_GO: &str = r#"#!/bin/sh
echo "$(pwd)|$*" >> "$FAKE_GO_LOG"
cmd="$1"
if [ "$cmd" = "$FAKE_GO_FAIL" ]; then
  echo "fake go: $cmd failed" >&2
  exit 1
fi
case "$cmd" in
  env)
    printf '%s\n' "$FAKE_GO_ENV_GOBIN"
    ;;
  mod)
    echo "module $3" > go.mod
    ;;
  get)
    if [ -n "$FAKE_GO_GET_SLEEP" ]; then
      exec sleep "$FAKE_GO_GET_SLEEP"
    fi
    ;;
  build)
    shift
    out=""
    while [ "$#" -gt 0 ]; do
      if [ "$1" = "-o" ]; then
        out="$2"
        shift
      fi
      shift
    done
    mkdir -p "$(dirname "$out")"
    echo "fake binary" > "$out"
    ;;
  *)
    exit 2
    ;;
esac
"#;

/// One logged toolchain invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoCall {
    pub dir: PathBuf,
    pub args: String,
}

impl GoCall {
    pub fn subcommand(&self) -> &str {
        self.args.split_whitespace().next().unwrap_or_default()
    }
}

/// Test project context
///
/// Creates a temporary directory holding a working directory, a GOBIN, a
/// private temp root for workspaces and the fake toolchain.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        for sub in ["work", "bin", "tmp", "tools"] {
            std::fs::create_dir_all(project.dir.path().join(sub))
                .expect("Failed to create directory");
        }
        project.install_fake_go();
        project
    }

    #[cfg(unix)]
    fn install_fake_go(&self) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.fake_go();
        std::fs::write(&path, FAKE_GO).expect("Failed to write fake go");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake go executable");
    }

    #[cfg(not(unix))]
    fn install_fake_go(&self) {}

    pub fn work_dir(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    pub fn gobin(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    pub fn tmp_dir(&self) -> PathBuf {
        self.dir.path().join("tmp")
    }

    pub fn fake_go(&self) -> PathBuf {
        self.dir.path().join("tools").join("go")
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("go.log")
    }

    /// Command running gostall in the work directory against the fake toolchain
    ///
    /// GOBIN is removed from the environment; tests opt in explicitly.
    pub fn gostall(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gostall"));
        cmd.current_dir(self.work_dir())
            .args(args)
            .env_remove("GOBIN")
            .env_remove("RUST_LOG")
            .env_remove("FAKE_GO_FAIL")
            .env_remove("FAKE_GO_ENV_GOBIN")
            .env_remove("FAKE_GO_GET_SLEEP")
            .env("GOSTALL_GO", self.fake_go())
            .env("FAKE_GO_LOG", self.log_path())
            .env("TMPDIR", self.tmp_dir());
        cmd
    }

    /// Invocations recorded by the fake toolchain, in order
    pub fn go_calls(&self) -> Vec<GoCall> {
        let Ok(log) = std::fs::read_to_string(self.log_path()) else {
            return Vec::new();
        };
        log.lines()
            .filter_map(|line| line.split_once('|'))
            .map(|(dir, args)| GoCall {
                dir: PathBuf::from(dir),
                args: args.to_string(),
            })
            .collect()
    }

    /// Workspace directories still present in the temp root
    pub fn leftover_workspaces(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.tmp_dir())
            .expect("Failed to read temp dir")
            .map(|entry| entry.expect("Failed to read entry").path())
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with("gostall-"))
            })
            .collect()
    }

    /// Check if a file exists relative to the project root
    pub fn file_exists(&self, path: &Path) -> bool {
        self.dir.path().join(path).exists()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
