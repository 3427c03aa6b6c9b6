pub mod all;
pub mod completion;
pub mod files;
pub mod list;
pub mod tree;

use como_core::{Config, SelectOptions};
use std::path::Path;

/// Selection options for a command, taken from its merged config.
pub(crate) fn selection_options(project_root: &Path, config: &Config) -> SelectOptions {
    SelectOptions::new(project_root)
        .ignore_patterns(config.ignore.patterns.clone())
        .respect_vcs_ignore(config.general.use_gitignore)
}
