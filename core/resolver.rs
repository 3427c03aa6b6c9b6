use crate::error::{AppError, Result};
use std::env;
use std::path::{Path, PathBuf};

pub const PROJECT_ROOT_ENV: &str = "PROJECT_ROOT";

/// Picks the project root from the CLI value, then `PROJECT_ROOT`, then the
/// current directory, and resolves it with [`resolve_root`].
pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
    let path_str_opt = cli_project_root
        .map(|p| p.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| env::var(PROJECT_ROOT_ENV).ok().filter(|s| !s.is_empty()));

    let path_to_resolve = match path_str_opt {
        Some(p_str) => PathBuf::from(shellexpand::tilde(&p_str).as_ref()),
        None => env::current_dir().map_err(AppError::Io)?,
    };

    resolve_root(&path_to_resolve)
}

/// Turns a user-supplied root into an absolute, canonical directory path.
///
/// An empty path or `.` means the current directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let candidate = if root.as_os_str().is_empty() {
        env::current_dir().map_err(AppError::Io)?
    } else {
        root.to_path_buf()
    };

    let canonical = candidate
        .canonicalize()
        .map_err(|e| AppError::RootResolution {
            path: candidate.clone(),
            source: e,
        })?;

    if !canonical.is_dir() {
        return Err(AppError::NotADirectory(canonical));
    }
    log::trace!(
        "Resolved root '{}' to '{}'",
        candidate.display(),
        canonical.display()
    );
    Ok(canonical)
}

/// Label printed on the first line of a rendered tree.
pub fn root_label_for(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
