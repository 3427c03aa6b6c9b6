use crate::entry::Entry;
use std::collections::BTreeMap;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const BLANK: &str = "    ";

/// A node of the render-time tree. Children are keyed, and therefore
/// ordered, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    name: String,
    is_dir: bool,
    is_symlink: bool,
    children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    pub fn children(&self) -> impl Iterator<Item = &TreeNode> {
        self.children.values()
    }

    fn insert(&mut self, segments: &[&str], entry: &Entry) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };
        let node = self
            .children
            .entry((*first).to_string())
            .or_insert_with(|| TreeNode::named(first));

        if rest.is_empty() {
            node.is_dir |= entry.is_dir();
            node.is_symlink |= entry.is_symlink();
        } else {
            // Anything with children is a directory, listed or not.
            node.is_dir = true;
            node.insert(rest, entry);
        }
    }
}

/// Rebuilds the directory hierarchy implied by the entries' relative paths.
/// Missing intermediate directories are synthesized.
pub fn build_tree(entries: &[Entry]) -> TreeNode {
    log::debug!("Building tree structure from {} paths...", entries.len());
    let mut root = TreeNode {
        is_dir: true,
        ..TreeNode::default()
    };
    for entry in entries {
        let segments: Vec<&str> = entry
            .normalized()
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        if segments.is_empty() {
            log::trace!("Skipping entry without path segments: {:?}", entry.relative_path());
            continue;
        }
        root.insert(&segments, entry);
    }
    root
}

/// Renders entries as an indented, branch-drawn tree whose first line is
/// `root_label/`.
///
/// The output depends only on the set of entries, not on their order.
pub fn render_tree(entries: &[Entry], root_label: &str) -> String {
    let root = build_tree(entries);
    let mut out = String::new();
    out.push_str(root_label);
    out.push_str("/\n");
    render_children(&root, "", &mut out);
    out
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (i, child) in node.children.values().enumerate() {
        let is_last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        out.push_str(&child.name);
        if child.is_dir {
            out.push('/');
        }
        if child.is_symlink {
            out.push_str(" (symlink)");
        }
        out.push('\n');

        if !child.children.is_empty() {
            let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { CONTINUATION });
            render_children(child, &child_prefix, out);
        }
    }
}
