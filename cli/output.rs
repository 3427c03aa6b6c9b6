use anyhow::Result;
use colored::*;
use como_core::AppError;
use como_core::content::stdout_destination;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where a command's artifact goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `None`, an empty string and `-` all mean stdout.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg.map(str::trim) {
            None | Some("") | Some("-") => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(PathBuf::from(path)),
        }
    }

    /// Path used to label write errors.
    pub fn destination(&self) -> PathBuf {
        match self {
            OutputTarget::Stdout => stdout_destination(),
            OutputTarget::File(path) => path.clone(),
        }
    }

    /// Opens a buffered writer, creating missing parent directories first.
    pub fn open(&self) -> Result<Box<dyn Write>> {
        match self {
            OutputTarget::Stdout => Ok(Box::new(BufWriter::new(io::stdout()))),
            OutputTarget::File(path) => {
                create_parent_dirs(path)?;
                let file = File::create(path).map_err(|e| AppError::FileWrite {
                    path: path.clone(),
                    source: e,
                })?;
                log::debug!("Writing output to {}", path.display());
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }

    pub fn finish(&self, mut writer: Box<dyn Write>, quiet: bool) -> Result<()> {
        writer.flush().map_err(|e| AppError::FileWrite {
            path: self.destination(),
            source: e,
        })?;
        if let OutputTarget::File(path) = self {
            if !quiet {
                eprintln!(
                    "{} Output saved to: {}",
                    "✅".green(),
                    path.display().to_string().blue()
                );
            }
        }
        Ok(())
    }
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            fs::create_dir_all(parent).map_err(|e| AppError::DirCreation {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Writes a whole string through `writer`, labelling failures with `target`.
pub fn write_text(writer: &mut dyn Write, text: &str, target: &OutputTarget) -> Result<()> {
    writer
        .write_all(text.as_bytes())
        .map_err(|e| AppError::FileWrite {
            path: target.destination(),
            source: e,
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn dash_and_empty_mean_stdout() {
        assert_eq!(OutputTarget::from_arg(None), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_arg(Some("")), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_arg(Some("-")), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_arg(Some("out.txt")),
            OutputTarget::File(PathBuf::from("out.txt"))
        );
    }

    #[test]
    fn file_target_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/deeper/context.txt");
        let target = OutputTarget::File(path.clone());

        let mut writer = target.open().unwrap();
        write_text(&mut writer, "hello\n", &target).unwrap();
        target.finish(writer, true).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "hello\n");
    }

    #[test]
    fn blocked_parent_is_a_dir_creation_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("blocker"), "").unwrap();
        let target = OutputTarget::File(tmp.path().join("blocker/out.txt"));

        let err = target.open().err().unwrap();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::DirCreation { .. })
        ));
    }
}
