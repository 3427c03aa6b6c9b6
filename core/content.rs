use crate::entry::Entry;
use crate::error::{AppError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Bytes inspected when deciding whether a file is binary.
pub const BINARY_SNIFF_LEN: usize = 1024;
pub const STRUCTURE_LABEL: &str = "PROJECT STRUCTURE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub text: String,
    pub is_binary: bool,
}

/// Counts from one concatenation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConcatSummary {
    pub written: usize,
    pub skipped_binary: usize,
    pub failed: usize,
}

/// Reads a file, classifying it as binary when a NUL byte appears in its
/// first [`BINARY_SNIFF_LEN`] bytes. Binary files come back with empty text.
pub fn read_file_content(path: &Path) -> Result<FileContent> {
    let bytes = fs::read(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if looks_binary(&bytes) {
        return Ok(FileContent {
            text: String::new(),
            is_binary: true,
        });
    }
    Ok(FileContent {
        text: String::from_utf8_lossy(&bytes).into_owned(),
        is_binary: false,
    })
}

pub fn looks_binary(bytes: &[u8]) -> bool {
    let check_len = bytes.len().min(BINARY_SNIFF_LEN);
    bytes[..check_len].contains(&0)
}

fn write_block<W: Write>(writer: &mut W, label: &str, body: &str, destination: &Path) -> Result<()> {
    write!(
        writer,
        "--- START FILE: {label} ---\n{body}\n--- END FILE: {label} ---\n\n"
    )
    .map_err(|e| AppError::FileWrite {
        path: destination.to_path_buf(),
        source: e,
    })
}

/// Writes the rendered tree framed as the `PROJECT STRUCTURE` block.
///
/// `destination` only labels write errors.
pub fn write_structure_block<W: Write>(writer: &mut W, tree: &str, destination: &Path) -> Result<()> {
    write_block(writer, STRUCTURE_LABEL, tree, destination)
}

/// Writes one framed block per regular file in `entries`.
///
/// Directories and symlinks are passed over. A file that cannot be read is
/// reported and skipped; a failed write aborts.
pub fn write_concatenation<W: Write>(
    writer: &mut W,
    entries: &[Entry],
    skip_binary: bool,
    destination: &Path,
) -> Result<ConcatSummary> {
    let mut summary = ConcatSummary::default();
    for entry in entries {
        if entry.is_dir() || entry.is_symlink() {
            log::debug!("Not concatenating {} (directory or symlink)", entry.normalized());
            continue;
        }

        let content = match read_file_content(entry.absolute_path()) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Skipping file {} due to read error: {}", entry.normalized(), e);
                summary.failed += 1;
                continue;
            }
        };

        if content.is_binary && skip_binary {
            log::info!("Skipping binary file: {}", entry.normalized());
            summary.skipped_binary += 1;
            continue;
        }

        write_block(writer, entry.normalized(), &content.text, destination)?;
        summary.written += 1;
    }
    Ok(summary)
}

/// Stand-in destination name for error messages when writing to stdout.
pub fn stdout_destination() -> PathBuf {
    PathBuf::from("<stdout>")
}
