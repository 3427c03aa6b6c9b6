pub mod config;
pub mod content;
pub mod entry;
pub mod enumerate;
pub mod error;
pub mod ignore_rules;
pub mod resolver;
pub mod select;
pub mod tree;
pub mod vcs;

pub use config::Config;
pub use content::{ConcatSummary, FileContent, read_file_content, write_concatenation, write_structure_block};
pub use entry::Entry;
pub use enumerate::Strategy;
pub use error::{AppError, Result};
pub use ignore_rules::IgnoreRuleSet;
pub use resolver::{determine_project_root, resolve_root, root_label_for};
pub use select::{SelectOptions, select, select_with};
pub use tree::{TreeNode, build_tree, render_tree};
pub use vcs::{GitCli, NoVcs, Vcs};
