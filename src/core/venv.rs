//! Virtualenv provisioning for freshly scaffolded projects.
//!
//! Shells out to `python3 -m venv` and the venv's own pip. Every
//! non-zero exit surfaces as a step failure; the pipeline treats the
//! whole provisioning as one step.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::log_status;
use crate::utils::command;

pub const VENV_DIR: &str = ".venv";

/// Create `.venv` inside the project root and install the project into
/// it editable. Returns the shell command that activates the new
/// environment.
pub fn provision(project_root: &Path) -> Result<String> {
    let venv_path = project_root.join(VENV_DIR);
    let venv_str = venv_path.to_string_lossy().to_string();

    command::run("python3", &["-m", "venv", &venv_str], "python3 -m venv")
        .map_err(|e| Error::env_provision_failed(e.message))?;

    let pip = pip_path(&venv_path);
    let pip_str = pip.to_string_lossy().to_string();
    let root_str = project_root.to_string_lossy().to_string();

    log_status!("venv", "Upgrading pip and setuptools");
    command::run(
        &pip_str,
        &["install", "-U", "pip", "setuptools"],
        "pip install -U pip setuptools",
    )
    .map_err(|e| Error::env_provision_failed(e.message))?;

    log_status!("venv", "Installing project (editable)");
    command::run(&pip_str, &["install", "-e", &root_str], "pip install -e")
        .map_err(|e| Error::env_provision_failed(e.message))?;

    let listing = command::run(&pip_str, &["list"], "pip list")
        .map_err(|e| Error::env_provision_failed(e.message))?;
    for line in listing.lines() {
        log_status!("venv", "{}", line);
    }

    Ok(activation_command(project_root))
}

fn pip_path(venv_path: &Path) -> PathBuf {
    venv_path.join("bin").join("pip")
}

/// The instruction printed after a successful run.
pub fn activation_command(project_root: &Path) -> String {
    format!(
        ". {}",
        project_root.join(VENV_DIR).join("bin").join("activate").display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_command_points_into_venv() {
        let cmd = activation_command(Path::new("/work/demo"));
        assert_eq!(cmd, ". /work/demo/.venv/bin/activate");
    }
}
