//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_plugins(&["tmux-plugins/tmux-yank"]);
//!     fixture.command().arg("status").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::git_available;
    pub use super::TestFixture;
}

/// Whether a `git` binary can be run on this machine.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A temporary home directory with a tmux configuration and a plugins
/// directory at `<home>/.config/tmux/plugins`.
///
/// Commands built from the fixture run with `HOME` and `XDG_CONFIG_HOME`
/// pointing into it, and with every variable that could redirect muxplug
/// elsewhere removed.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new fixture with an empty home directory.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child(".config/tmux")
            .create_dir_all()
            .expect("Failed to create config directory");
        Self { temp_dir }
    }

    /// Write `tmux.conf` with the given raw content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(".config/tmux/tmux.conf")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Write `tmux.conf` declaring each reference with `set -g @plugin`.
    pub fn with_plugins(self, references: &[&str]) -> Self {
        let mut content = String::from("set -g mouse on\n");
        for reference in references {
            content.push_str(&format!("set -g @plugin '{}'\n", reference));
        }
        content.push_str("run 'muxplug source'\n");
        self.with_config(&content)
    }

    /// Create an installed plugin directory under the plugins root.
    pub fn with_installed(self, dir_name: &str) -> Self {
        self.temp_dir
            .child(format!(".config/tmux/plugins/{}", dir_name))
            .create_dir_all()
            .expect("Failed to create plugin directory");
        self
    }

    /// Path to the fixture's home directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path to the fixture's `tmux.conf`.
    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        self.path().join(".config/tmux/tmux.conf")
    }

    /// Path plugins are installed into.
    pub fn plugins_root(&self) -> PathBuf {
        self.path().join(".config/tmux/plugins")
    }

    /// Path of one plugin directory.
    pub fn plugin(&self, dir_name: &str) -> PathBuf {
        self.plugins_root().join(dir_name)
    }

    /// Create a command isolated to this fixture's home directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("muxplug");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("MUXPLUG_CONFIG")
            .env_remove("MUXPLUG_GIT_HOST")
            .env_remove("MUXPLUG_LOG")
            .env_remove("TMUX_PLUGIN_MANAGER_PATH");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A directory of local git repositories laid out as `<owner>/<repo>`, usable
/// as a `--git-host` through a `file://` URL.
#[allow(dead_code)]
pub struct LocalGitHost {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl LocalGitHost {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create `<owner>/<repo>` with one commit containing `files`.
    pub fn with_repo(self, reference: &str, files: &[(&str, &str)]) -> Self {
        let repo = self.temp_dir.child(reference);
        repo.create_dir_all().expect("Failed to create repository");
        for (name, content) in files {
            repo.child(name)
                .write_str(content)
                .expect("Failed to write repository file");
        }
        git(repo.path(), &["init", "--quiet"]);
        git(repo.path(), &["add", "."]);
        git(
            repo.path(),
            &[
                "-c",
                "user.name=muxplug",
                "-c",
                "user.email=muxplug@example.com",
                "commit",
                "--quiet",
                "-m",
                "initial",
            ],
        );
        self
    }

    /// Add a commit to an existing repository.
    pub fn commit(&self, reference: &str, name: &str, content: &str) {
        let repo = self.temp_dir.child(reference);
        repo.child(name)
            .write_str(content)
            .expect("Failed to write repository file");
        git(repo.path(), &["add", "."]);
        git(
            repo.path(),
            &[
                "-c",
                "user.name=muxplug",
                "-c",
                "user.email=muxplug@example.com",
                "commit",
                "--quiet",
                "-m",
                name,
            ],
        );
    }

    /// The `file://` URL to pass as `--git-host`.
    pub fn url(&self) -> String {
        format!("file://{}/", self.temp_dir.path().display())
    }
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed in {}", args, dir.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_config_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().join(".config/tmux").is_dir());
    }

    #[test]
    fn test_fixture_with_plugins_writes_declarations() {
        let fixture = TestFixture::new().with_plugins(&["a/b", "c/d#dev"]);
        let content = std::fs::read_to_string(fixture.config_path()).unwrap();
        assert!(content.contains("set -g @plugin 'a/b'"));
        assert!(content.contains("set -g @plugin 'c/d#dev'"));
    }

    #[test]
    fn test_fixture_with_installed() {
        let fixture = TestFixture::new().with_installed("tmux-yank");
        assert!(fixture.plugin("tmux-yank").is_dir());
    }
}
