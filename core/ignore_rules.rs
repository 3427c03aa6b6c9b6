use crate::entry::normalize_relative;
use crate::error::{AppError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

pub const GITIGNORE_FILENAME: &str = ".gitignore";

/// Compiled exclusion rules for one selection: the root `.gitignore` (if any)
/// OR-ed with the caller's custom glob patterns.
#[derive(Debug)]
pub struct IgnoreRuleSet {
    gitignore: Option<Gitignore>,
    custom: Vec<CustomPattern>,
}

#[derive(Debug)]
struct CustomPattern {
    original: String,
    matcher: GlobSet,
}

impl IgnoreRuleSet {
    /// Compiles both rule sources.
    ///
    /// A broken `.gitignore` only produces a warning; an invalid custom
    /// pattern is an error naming that pattern.
    pub fn compile(root: &Path, custom_patterns: &[String], respect_vcs_ignore: bool) -> Result<Self> {
        let custom = custom_patterns
            .iter()
            .map(|p| compile_custom_pattern(p))
            .collect::<Result<Vec<_>>>()?;

        let gitignore = if respect_vcs_ignore {
            compile_gitignore(root)
        } else {
            log::debug!("Ignoring {} rules by request", GITIGNORE_FILENAME);
            None
        };

        log::debug!(
            "Ignore rules compiled (gitignore: {}, custom patterns: {})",
            gitignore.is_some(),
            custom.len()
        );
        Ok(Self { gitignore, custom })
    }

    /// A rule set that excludes nothing.
    pub fn empty() -> Self {
        Self {
            gitignore: None,
            custom: Vec::new(),
        }
    }

    pub fn has_gitignore(&self) -> bool {
        self.gitignore.is_some()
    }

    /// True if either the gitignore rules or any custom pattern excludes the path.
    pub fn is_excluded(&self, relative_path: &Path, is_dir: bool) -> bool {
        if self.vcs_prunes(relative_path, is_dir) {
            log::trace!("Excluded by {}: {}", GITIGNORE_FILENAME, relative_path.display());
            return true;
        }

        let normalized = normalize_relative(relative_path);
        match self.custom.iter().find(|p| p.matcher.is_match(&normalized)) {
            Some(pattern) => {
                log::trace!("Excluded by pattern \"{}\": {}", pattern.original, normalized);
                true
            }
            None => false,
        }
    }

    /// The gitignore half of [`is_excluded`](Self::is_excluded), used to prune
    /// directory walks.
    pub fn vcs_prunes(&self, relative_path: &Path, is_dir: bool) -> bool {
        self.gitignore.as_ref().is_some_and(|gi| {
            gi.matched_path_or_any_parents(relative_path, is_dir)
                .is_ignore()
        })
    }
}

fn compile_custom_pattern(pattern_str: &str) -> Result<CustomPattern> {
    let trimmed = pattern_str.trim();
    // `dist/` excludes the directory itself as well as everything below it.
    let processed_patterns = match trimmed.strip_suffix('/') {
        Some(dir) if !dir.is_empty() => vec![dir.to_string(), format!("{dir}/**")],
        _ => vec![trimmed.to_string()],
    };

    let invalid = |e: globset::Error| {
        log::error!("Invalid ignore pattern \"{}\": {}", pattern_str, e);
        AppError::InvalidIgnorePattern {
            pattern: pattern_str.to_string(),
            source: e,
        }
    };

    let mut builder = GlobSetBuilder::new();
    for processed in &processed_patterns {
        builder.add(Glob::new(processed).map_err(invalid)?);
    }
    let matcher = builder.build().map_err(invalid)?;
    log::trace!(
        "Adding ignore pattern: {} (processed as {:?})",
        pattern_str,
        processed_patterns
    );
    Ok(CustomPattern {
        original: pattern_str.to_string(),
        matcher,
    })
}

fn compile_gitignore(root: &Path) -> Option<Gitignore> {
    let gitignore_path = root.join(GITIGNORE_FILENAME);
    if !gitignore_path.is_file() {
        log::trace!("No {} at {}", GITIGNORE_FILENAME, root.display());
        return None;
    }

    let mut builder = GitignoreBuilder::new(root);
    if let Some(e) = builder.add(&gitignore_path) {
        log::warn!(
            "Could not compile {}: {} (continuing without gitignore rules)",
            gitignore_path.display(),
            e
        );
        return None;
    }
    match builder.build() {
        Ok(gitignore) => {
            log::debug!(
                "Loaded {} rules from {}",
                gitignore.num_ignores(),
                gitignore_path.display()
            );
            Some(gitignore)
        }
        Err(e) => {
            log::warn!(
                "Could not compile {}: {} (continuing without gitignore rules)",
                gitignore_path.display(),
                e
            );
            None
        }
    }
}
