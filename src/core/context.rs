//! Mutable per-run state threaded through the scaffold pipeline.
//!
//! Created empty (destination only) before the run, populated
//! incrementally by the steps, and discarded when the process exits.
//! The runner owns the context exclusively; there is no global state.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::core::local_files::{local, FileSystem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CiProvider {
    Travis,
    GithubActions,
}

impl CiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CiProvider::Travis => "travis",
            CiProvider::GithubActions => "github",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "travis" => Ok(CiProvider::Travis),
            "github" => Ok(CiProvider::GithubActions),
            other => Err(Error::validation_invalid_argument(
                "ci",
                format!("Unknown CI provider '{}'", other),
                None,
                Some(vec!["travis".to_string(), "github".to_string()]),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub destination_path: PathBuf,

    // Prompted answers
    pub project_name: String,
    pub project_description: String,
    pub git_ssh_url: String,
    pub git_https_url: String,
    pub author_name: String,
    pub author_email: String,
    pub project_tags: String,

    // Feature flags
    pub use_ci: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_provider: Option<CiProvider>,
    pub with_tests: bool,
    pub with_venv: bool,

    // Derived paths, populated by earlier steps and read by later ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_dir: Option<PathBuf>,

    /// Files and directories written by the run, relative to the
    /// project root. Part of the final output payload.
    pub artifacts: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub venv_activation: Option<String>,
}

impl ProjectContext {
    pub fn new(destination_path: PathBuf) -> Self {
        Self {
            destination_path,
            project_name: String::new(),
            project_description: String::new(),
            git_ssh_url: String::new(),
            git_https_url: String::new(),
            author_name: String::new(),
            author_email: String::new(),
            project_tags: String::new(),
            use_ci: false,
            ci_provider: None,
            with_tests: false,
            with_venv: false,
            project_root: None,
            package_dir: None,
            artifacts: Vec::new(),
            venv_activation: None,
        }
    }

    /// Project root is set by the clone step; every later step requires it.
    pub fn require_project_root(&self) -> Result<&Path> {
        self.project_root.as_deref().ok_or_else(|| {
            Error::internal_unexpected("Project root not set; clone step has not run")
        })
    }

    pub fn require_package_dir(&self) -> Result<&Path> {
        self.package_dir.as_deref().ok_or_else(|| {
            Error::internal_unexpected("Package directory not set; create step has not run")
        })
    }

    pub fn record_artifact(&mut self, relative_path: impl Into<String>) {
        self.artifacts.push(relative_path.into());
    }

    /// The pipeline's single compensation: delete the cloned repository
    /// directory. Sufficient to undo every step that only writes inside
    /// it. A no-op when the clone step never set the root.
    pub fn remove_project_root(&mut self) -> Result<()> {
        if let Some(root) = self.project_root.take() {
            local().remove_dir_all(&root)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn remove_project_root_deletes_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("cloned");
        std::fs::create_dir_all(root.join("pkg")).unwrap();
        std::fs::write(root.join("pkg").join("f.py"), "").unwrap();

        let mut ctx = ProjectContext::new(dir.path().to_path_buf());
        ctx.project_root = Some(root.clone());

        ctx.remove_project_root().unwrap();
        assert!(!root.exists());
        assert!(ctx.project_root.is_none());
    }

    #[test]
    fn remove_project_root_is_noop_without_root() {
        let dir = tempdir().unwrap();
        let mut ctx = ProjectContext::new(dir.path().to_path_buf());
        assert!(ctx.remove_project_root().is_ok());
    }

    #[test]
    fn require_project_root_errors_before_clone() {
        let ctx = ProjectContext::new(PathBuf::from("/tmp"));
        assert!(ctx.require_project_root().is_err());
    }

    #[test]
    fn ci_provider_parse() {
        assert_eq!(CiProvider::parse("travis").unwrap(), CiProvider::Travis);
        assert_eq!(
            CiProvider::parse("github").unwrap(),
            CiProvider::GithubActions
        );
        assert!(CiProvider::parse("circle").is_err());
    }
}
