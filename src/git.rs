use std::path::Path;
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Environment variable that stops git from prompting for credentials.
const NO_PROMPT: (&str, &str) = ("GIT_TERMINAL_PROMPT", "0");

/// Outcome of `git pull`, classified by exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullStatus {
    Ok,
    /// Exit status 1.
    RemoteNotFound,
    /// Exit status 128.
    MergeConflict,
    /// Any other status; `-1` when the process was terminated by a signal.
    Other(i32),
}

impl PullStatus {
    /// Maps a process exit code to a pull outcome.
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => PullStatus::Ok,
            Some(1) => PullStatus::RemoteNotFound,
            Some(128) => PullStatus::MergeConflict,
            Some(code) => PullStatus::Other(code),
            None => PullStatus::Other(-1),
        }
    }

    /// Converts a failed status into the matching error.
    pub fn into_result(self, path: &Path) -> Result<()> {
        match self {
            PullStatus::Ok => Ok(()),
            PullStatus::RemoteNotFound => Err(Error::RemoteNotFound {
                path: path.to_path_buf(),
            }),
            PullStatus::MergeConflict => Err(Error::MergeConflict {
                path: path.to_path_buf(),
            }),
            PullStatus::Other(code) => Err(Error::PullFailed {
                path: path.to_path_buf(),
                code,
            }),
        }
    }
}

/// Whether the `git` binary can be executed.
pub fn is_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Clone a repository with its submodules into `target_dir`.
///
/// Only the requested branch is fetched; `None` means the remote's default
/// branch. Returns the combined stdout/stderr of git for logging.
pub fn clone(url: &str, branch: Option<&str>, target_dir: &Path) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.arg("clone");
    if let Some(branch) = branch {
        cmd.args(["-b", branch]);
    }
    cmd.args(["--single-branch", "--recursive", url])
        .arg(target_dir)
        .env(NO_PROMPT.0, NO_PROMPT.1);

    let clone_error = |message: String| Error::GitClone {
        url: url.to_string(),
        branch: branch.map(str::to_string),
        message,
    };

    let output = cmd.output().map_err(|e| clone_error(e.to_string()))?;
    let combined = combined_output(&output);
    if !output.status.success() {
        return Err(clone_error(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(combined)
}

/// Run `git pull` in `path` and classify the result.
pub fn pull(path: &Path) -> Result<PullStatus> {
    let status = Command::new("git")
        .arg("-C")
        .arg(path)
        .arg("pull")
        .env(NO_PROMPT.0, NO_PROMPT.1)
        .output()?
        .status;
    Ok(PullStatus::from_exit_code(status.code()))
}

/// Run `git submodule update --init --recursive` in `path`.
pub fn submodule_update(path: &Path) -> Result<()> {
    let output = Command::new("git")
        .arg("-C")
        .arg(path)
        .args(["submodule", "update", "--init", "--recursive"])
        .env(NO_PROMPT.0, NO_PROMPT.1)
        .output()
        .map_err(|e| Error::Submodule {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::Submodule {
            path: path.to_path_buf(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}
