use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// One filesystem object under consideration by the selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    absolute_path: PathBuf,
    #[serde(skip)]
    relative_path: PathBuf,
    #[serde(rename = "relativePath")]
    normalized: String,
    is_dir: bool,
    is_symlink: bool,
}

impl Entry {
    pub fn new(absolute_path: PathBuf, relative_path: PathBuf, is_dir: bool, is_symlink: bool) -> Self {
        let normalized = normalize_relative(&relative_path);
        Self {
            absolute_path,
            relative_path,
            normalized,
            is_dir,
            is_symlink,
        }
    }

    /// Builds an entry from a non-dereferencing stat of `absolute_path`.
    pub fn stat(absolute_path: PathBuf, relative_path: PathBuf) -> io::Result<Self> {
        let meta = fs::symlink_metadata(&absolute_path)?;
        let file_type = meta.file_type();
        Ok(Self::new(
            absolute_path,
            relative_path,
            file_type.is_dir(),
            file_type.is_symlink(),
        ))
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// OS-native relative path, for filesystem I/O.
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Forward-slash relative path, for matching, sorting and display.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }
}

/// Joins the path's components with `/`, dropping `.` segments.
pub fn normalize_relative(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => parts.push("..".to_string()),
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}
