use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const VCS_METADATA_DIR: &str = ".git";

/// The repository queries the selector needs. Every failure here is
/// recoverable: callers fall back to walking the filesystem.
pub trait Vcs {
    /// Whether `dir` sits inside a repository working tree.
    fn is_inside_work_tree(&self, dir: &Path) -> bool;

    /// Absolute path of the repository's top-level directory.
    fn repository_root(&self, dir: &Path) -> Result<PathBuf>;

    /// Tracked plus untracked-but-not-ignored paths, relative to the
    /// repository root.
    fn list_paths(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Queries the `git` executable found on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitCli {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<Output> {
        log::trace!("Running git {:?} in {}", args, dir.display());
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| AppError::Vcs(format!("failed to run git {}: {}", args.join(" "), e)))?;

        if !output.status.success() {
            return Err(AppError::Vcs(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output)
    }
}

impl Vcs for GitCli {
    fn is_inside_work_tree(&self, dir: &Path) -> bool {
        if dir.join(VCS_METADATA_DIR).exists() {
            return true;
        }
        match self.run(dir, &["rev-parse", "--is-inside-work-tree"]) {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "true",
            Err(e) => {
                log::trace!("Not inside a git work tree: {}", e);
                false
            }
        }
    }

    fn repository_root(&self, dir: &Path) -> Result<PathBuf> {
        let output = self.run(dir, &["rev-parse", "--show-toplevel"])?;
        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if root.is_empty() {
            return Err(AppError::Vcs("git reported an empty repository root".to_string()));
        }
        Ok(PathBuf::from(root))
    }

    fn list_paths(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let output = self.run(
            dir,
            &["ls-files", "-coz", "--exclude-standard", "--full-name", "--"],
        )?;
        Ok(parse_nul_delimited(&output.stdout))
    }
}

/// A [`Vcs`] that never recognizes a repository, forcing a filesystem walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVcs;

impl Vcs for NoVcs {
    fn is_inside_work_tree(&self, _dir: &Path) -> bool {
        false
    }

    fn repository_root(&self, _dir: &Path) -> Result<PathBuf> {
        Err(AppError::Vcs("no version control available".to_string()))
    }

    fn list_paths(&self, _dir: &Path) -> Result<Vec<PathBuf>> {
        Err(AppError::Vcs("no version control available".to_string()))
    }
}

fn parse_nul_delimited(stdout: &[u8]) -> Vec<PathBuf> {
    stdout
        .split(|b| *b == 0)
        .filter(|chunk| !chunk.is_empty())
        .map(path_from_bytes)
        .collect()
}

/// Git reports raw path bytes; on unix they map onto an `OsStr` unchanged.
#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nul_delimited_listing() {
        let raw = b"src/main.rs\0docs/read me.md\0\0";
        let paths = parse_nul_delimited(raw);
        assert_eq!(
            paths,
            vec![PathBuf::from("src/main.rs"), PathBuf::from("docs/read me.md")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_keep_their_bytes() {
        use std::os::unix::ffi::OsStrExt;
        let paths = parse_nul_delimited(b"caf\xe9.txt\0plain.txt\0");
        assert_eq!(paths[0].as_os_str().as_bytes(), b"caf\xe9.txt");
        assert_eq!(paths[1], PathBuf::from("plain.txt"));
    }

    #[test]
    fn empty_listing_yields_nothing() {
        assert!(parse_nul_delimited(b"").is_empty());
    }

    #[test]
    fn no_vcs_never_detects_a_repository() {
        let vcs = NoVcs;
        assert!(!vcs.is_inside_work_tree(Path::new("/")));
        assert!(vcs.list_paths(Path::new("/")).is_err());
    }
}
