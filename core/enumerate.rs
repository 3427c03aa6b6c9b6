use crate::entry::{Entry, normalize_relative};
use crate::error::{AppError, Result};
use crate::ignore_rules::IgnoreRuleSet;
use crate::vcs::{VCS_METADATA_DIR, Vcs};
use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// How the raw candidate set is discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy<'a> {
    /// Expand caller-supplied file/glob arguments against the root.
    ExplicitGlob(&'a [String]),
    /// Ask the version control system for tracked and unignored paths.
    VcsListing,
    /// Recursively walk the root directory.
    FilesystemWalk,
}

impl<'a> Strategy<'a> {
    pub fn choose(explicit_args: &'a [String], inside_repository: bool) -> Self {
        if !explicit_args.is_empty() {
            Strategy::ExplicitGlob(explicit_args)
        } else if inside_repository {
            Strategy::VcsListing
        } else {
            Strategy::FilesystemWalk
        }
    }
}

/// Produces the unfiltered candidates under `root`, one per absolute path.
///
/// `root` must already be canonical. A failed VCS listing falls back to a
/// filesystem walk.
pub fn enumerate(
    root: &Path,
    strategy: Strategy<'_>,
    rules: &IgnoreRuleSet,
    vcs: &dyn Vcs,
) -> Result<Vec<Entry>> {
    let found = match strategy {
        Strategy::ExplicitGlob(args) => {
            log::info!("Resolving {} file argument(s) against {}", args.len(), root.display());
            expand_explicit_args(root, args)?
        }
        Strategy::VcsListing => {
            log::info!("Listing repository files under {}", root.display());
            match list_from_vcs(root, vcs) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!(
                        "Repository listing failed in {} (falling back to filesystem walk): {}",
                        root.display(),
                        e
                    );
                    walk_filesystem(root, rules)
                }
            }
        }
        Strategy::FilesystemWalk => {
            log::info!("Walking project directory: {}", root.display());
            walk_filesystem(root, rules)
        }
    };

    let mut unique: BTreeMap<PathBuf, Entry> = BTreeMap::new();
    for entry in found {
        unique.insert(entry.absolute_path().to_path_buf(), entry);
    }
    log::debug!("Enumeration found {} candidate path(s)", unique.len());
    Ok(unique.into_values().collect())
}

fn expand_explicit_args(root: &Path, args: &[String]) -> Result<Vec<Entry>> {
    let escaped_root = PathBuf::from(glob::Pattern::escape(&root.to_string_lossy()));
    let mut entries = Vec::new();

    for arg in args {
        let pattern = if Path::new(arg).is_absolute() {
            arg.clone()
        } else {
            escaped_root.join(arg).to_string_lossy().into_owned()
        };
        log::trace!("Expanding file argument '{}' as '{}'", arg, pattern);

        let matches = glob::glob(&pattern).map_err(|e| AppError::InvalidArgPattern {
            pattern: arg.clone(),
            source: e,
        })?;

        let mut matched_any = false;
        for item in matches {
            let matched = match item {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("Could not read {} while expanding '{}': {}", e.path().display(), arg, e.error());
                    continue;
                }
            };
            matched_any = true;

            let absolute = clean_path(&matched);
            let relative = match pathdiff::diff_paths(&absolute, root) {
                Some(rel) => rel,
                None => {
                    log::warn!(
                        "Could not get relative path for {} (base: {})",
                        absolute.display(),
                        root.display()
                    );
                    continue;
                }
            };
            if normalize_relative(&relative).is_empty() {
                log::trace!("Skipping project root matched by '{}'", arg);
                continue;
            }
            if let Some(entry) = stat_candidate(absolute, relative) {
                entries.push(entry);
            }
        }
        if !matched_any {
            log::debug!("File argument '{}' matched nothing", arg);
        }
    }
    Ok(entries)
}

fn list_from_vcs(root: &Path, vcs: &dyn Vcs) -> Result<Vec<Entry>> {
    let listed = vcs.list_paths(root)?;

    let repo_root = match vcs.repository_root(root) {
        Ok(repo_root) => repo_root.canonicalize().unwrap_or(repo_root),
        Err(e) => {
            log::warn!(
                "Could not determine repository root for {}, assuming it is the project directory: {}",
                root.display(),
                e
            );
            root.to_path_buf()
        }
    };
    log::debug!(
        "Repository root {} listed {} path(s)",
        repo_root.display(),
        listed.len()
    );

    let mut entries = Vec::with_capacity(listed.len());
    for path_in_repo in listed {
        let absolute = repo_root.join(&path_in_repo);
        let relative = match absolute.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => {
                log::trace!("Outside project root: {}", absolute.display());
                continue;
            }
        };
        if let Some(entry) = stat_candidate(absolute, relative) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn walk_filesystem(root: &Path, rules: &IgnoreRuleSet) -> Vec<Entry> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| keep_walked(root, rules, e));

    let mut entries = Vec::new();
    for result in walker {
        match result {
            Ok(dir_entry) => {
                let path = dir_entry.path();
                let relative = match path.strip_prefix(root) {
                    Ok(rel) => rel.to_path_buf(),
                    Err(_) => {
                        log::warn!("Could not get relative path for: {}", path.display());
                        continue;
                    }
                };
                let file_type = dir_entry.file_type();
                log::trace!("Walked path: {}", relative.display());
                entries.push(Entry::new(
                    path.to_path_buf(),
                    relative,
                    file_type.is_dir(),
                    file_type.is_symlink(),
                ));
            }
            Err(e) => {
                let at = e
                    .path()
                    .map_or_else(|| "unknown path".into(), |p| p.display().to_string());
                log::warn!("Error accessing path {}: {}", at, e);
            }
        }
    }
    entries
}

fn keep_walked(root: &Path, rules: &IgnoreRuleSet, dir_entry: &DirEntry) -> bool {
    let is_dir = dir_entry.file_type().is_dir();
    if is_dir && dir_entry.file_name() == VCS_METADATA_DIR {
        log::trace!("Skipping metadata directory: {}", dir_entry.path().display());
        return false;
    }
    match dir_entry.path().strip_prefix(root) {
        Ok(relative) if rules.vcs_prunes(relative, is_dir) => {
            log::trace!("Pruned by gitignore: {}", relative.display());
            false
        }
        _ => true,
    }
}

/// Lstat a candidate; a path that vanished since discovery is dropped quietly.
fn stat_candidate(absolute: PathBuf, relative: PathBuf) -> Option<Entry> {
    match Entry::stat(absolute.clone(), relative) {
        Ok(entry) => Some(entry),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::trace!("Skipping vanished path: {}", absolute.display());
            None
        }
        Err(e) => {
            log::warn!("Could not stat {}: {}", absolute.display(), e);
            None
        }
    }
}

/// Lexically removes `.` and resolvable `..` components.
fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}
