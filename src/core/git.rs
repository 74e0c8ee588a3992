use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::command;

/// Clone a git repository to a target directory.
pub fn clone_repo(url: &str, target_dir: &Path) -> Result<()> {
    command::run(
        "git",
        &["clone", url, &target_dir.to_string_lossy()],
        "git clone",
    )
    .map_err(|e| Error::git_command_failed(e.to_string()))?;
    Ok(())
}

/// Derive the checkout directory name from a remote URL, the same way
/// `git clone` does: last path segment, trailing `.git` stripped.
pub fn repo_dir_name(url: &str) -> Result<String> {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or("")
        .trim_end_matches(".git");

    if last.is_empty() {
        return Err(Error::validation_invalid_argument(
            "git_url",
            format!("Cannot derive repository name from '{}'", url),
            None,
            None,
        ));
    }

    Ok(last.to_string())
}
