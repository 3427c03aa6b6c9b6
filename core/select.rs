use crate::entry::Entry;
use crate::enumerate::{Strategy, enumerate};
use crate::error::Result;
use crate::ignore_rules::IgnoreRuleSet;
use crate::resolver::resolve_root;
use crate::vcs::{GitCli, Vcs};
use std::path::PathBuf;

/// Inputs for one selection run.
#[derive(Debug, Clone)]
pub struct SelectOptions {
    pub root: PathBuf,
    pub ignore_patterns: Vec<String>,
    pub respect_vcs_ignore: bool,
    pub explicit_args: Vec<String>,
    pub include_dirs: bool,
}

impl SelectOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_patterns: Vec::new(),
            respect_vcs_ignore: true,
            explicit_args: Vec::new(),
            include_dirs: false,
        }
    }

    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn respect_vcs_ignore(mut self, respect: bool) -> Self {
        self.respect_vcs_ignore = respect;
        self
    }

    pub fn explicit_args(mut self, args: Vec<String>) -> Self {
        self.explicit_args = args;
        self
    }

    pub fn include_dirs(mut self, include: bool) -> Self {
        self.include_dirs = include;
        self
    }
}

/// Selects entries using the `git` executable for repository listings.
pub fn select(options: &SelectOptions) -> Result<Vec<Entry>> {
    select_with(options, &GitCli)
}

/// Selects entries under `options.root`, sorted byte-wise by relative path.
///
/// Fails only for an unresolvable root, an invalid custom ignore pattern or
/// an invalid explicit-argument glob. An empty result is not an error.
pub fn select_with(options: &SelectOptions, vcs: &dyn Vcs) -> Result<Vec<Entry>> {
    let root = resolve_root(&options.root)?;
    log::debug!("Selecting entries under {}", root.display());

    let rules = IgnoreRuleSet::compile(&root, &options.ignore_patterns, options.respect_vcs_ignore)?;

    let inside_repository = options.explicit_args.is_empty() && vcs.is_inside_work_tree(&root);
    let strategy = Strategy::choose(&options.explicit_args, inside_repository);
    log::debug!("Enumeration strategy: {:?}", strategy);

    let candidates = enumerate(&root, strategy, &rules, vcs)?;
    let candidate_count = candidates.len();

    let mut selected: Vec<Entry> = candidates
        .into_iter()
        .filter(|entry| !rules.is_excluded(entry.relative_path(), entry.is_dir()))
        .filter(|entry| options.include_dirs || !entry.is_dir())
        .collect();

    selected.sort_by(|a, b| a.normalized().as_bytes().cmp(b.normalized().as_bytes()));

    log::info!(
        "Selected {} of {} candidate path(s) under {}",
        selected.len(),
        candidate_count,
        root.display()
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::vcs::NoVcs;
    use std::fs;
    use tempfile::TempDir;

    fn rels(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(Entry::normalized).collect()
    }

    #[test]
    fn custom_pattern_excludes_matching_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("x.log"), "log").unwrap();
        fs::write(tmp.path().join("y.go"), "package main").unwrap();

        let options = SelectOptions::new(tmp.path()).ignore_patterns(vec!["*.log".to_string()]);
        let selected = select_with(&options, &NoVcs).unwrap();

        assert_eq!(rels(&selected), vec!["y.go"]);
    }

    #[test]
    fn directory_pattern_drops_the_directory_node_too() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("dist/js")).unwrap();
        fs::write(tmp.path().join("dist/js/app.js"), "x").unwrap();
        fs::write(tmp.path().join("main.rs"), "fn main() {}").unwrap();

        let options = SelectOptions::new(tmp.path())
            .ignore_patterns(vec!["dist/".to_string()])
            .include_dirs(true);
        let selected = select_with(&options, &NoVcs).unwrap();

        assert_eq!(rels(&selected), vec!["main.rs"]);
    }

    #[test]
    fn gitignored_metadata_directory_is_never_selected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".gitignore"), ".gitignore\nsub/.git/\n").unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::create_dir_all(tmp.path().join("sub/.git")).unwrap();
        fs::write(tmp.path().join("sub/b.txt"), "b").unwrap();
        fs::write(tmp.path().join("sub/.git/ignored.txt"), "x").unwrap();

        let options = SelectOptions::new(tmp.path()).include_dirs(true);
        let selected = select_with(&options, &NoVcs).unwrap();

        assert_eq!(rels(&selected), vec!["a.txt", "sub", "sub/b.txt"]);
    }

    #[test]
    fn explicit_args_ignore_patterns_that_match_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("readme.md"), "# readme").unwrap();

        let options = SelectOptions::new(tmp.path())
            .explicit_args(vec!["*.md".to_string(), "missing.txt".to_string()]);
        let selected = select_with(&options, &NoVcs).unwrap();

        assert_eq!(rels(&selected), vec!["readme.md"]);
    }

    #[test]
    fn explicit_args_still_honor_ignore_rules() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".gitignore"), "secret.md\n").unwrap();
        fs::write(tmp.path().join("readme.md"), "r").unwrap();
        fs::write(tmp.path().join("secret.md"), "s").unwrap();
        fs::write(tmp.path().join("draft.md"), "d").unwrap();

        let options = SelectOptions::new(tmp.path())
            .explicit_args(vec!["*.md".to_string()])
            .ignore_patterns(vec!["draft*".to_string()]);
        let selected = select_with(&options, &NoVcs).unwrap();

        assert_eq!(rels(&selected), vec!["readme.md"]);
    }

    #[test]
    fn empty_directory_is_a_valid_empty_result() {
        let tmp = TempDir::new().unwrap();
        let selected = select_with(&SelectOptions::new(tmp.path()).include_dirs(true), &NoVcs).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn directories_are_dropped_unless_requested() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("a/b/c.txt"), "c").unwrap();

        let files_only = select_with(&SelectOptions::new(tmp.path()), &NoVcs).unwrap();
        let with_dirs = select_with(&SelectOptions::new(tmp.path()).include_dirs(true), &NoVcs).unwrap();

        assert_eq!(rels(&files_only), vec!["a/b/c.txt"]);
        assert_eq!(rels(&with_dirs), vec!["a", "a/b", "a/b/c.txt"]);
    }

    #[test]
    fn ordering_is_bytewise() {
        let tmp = TempDir::new().unwrap();
        for name in ["b.txt", "Z.txt", "a-b.txt", "a.txt", "a_b.txt"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }

        let selected = select_with(&SelectOptions::new(tmp.path()), &NoVcs).unwrap();

        assert_eq!(rels(&selected), vec!["Z.txt", "a-b.txt", "a.txt", "a_b.txt", "b.txt"]);
    }

    struct PanickingVcs;

    impl Vcs for PanickingVcs {
        fn is_inside_work_tree(&self, _dir: &std::path::Path) -> bool {
            panic!("enumeration must not start for an invalid pattern");
        }
        fn repository_root(&self, _dir: &std::path::Path) -> Result<PathBuf> {
            panic!("enumeration must not start for an invalid pattern");
        }
        fn list_paths(&self, _dir: &std::path::Path) -> Result<Vec<PathBuf>> {
            panic!("enumeration must not start for an invalid pattern");
        }
    }

    #[test]
    fn invalid_pattern_fails_before_enumeration() {
        let tmp = TempDir::new().unwrap();
        let options = SelectOptions::new(tmp.path()).ignore_patterns(vec!["[abc".to_string()]);

        let err = select_with(&options, &PanickingVcs).unwrap_err();

        assert!(matches!(err, AppError::InvalidIgnorePattern { .. }));
        assert!(err.to_string().contains("[abc"));
    }

    #[test]
    fn unresolvable_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let options = SelectOptions::new(tmp.path().join("does-not-exist"));
        assert!(matches!(
            select_with(&options, &NoVcs),
            Err(AppError::RootResolution { .. })
        ));
    }
}
