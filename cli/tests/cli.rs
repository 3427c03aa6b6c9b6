use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn como() -> Command {
    let mut cmd = Command::cargo_bin("como").unwrap();
    cmd.env_remove("PROJECT_ROOT");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.txt", "alpha");
    write(tmp.path(), "sub/b.txt", "beta");
    write(tmp.path(), "debug.log", "noise");
    tmp
}

fn label(tmp: &TempDir) -> String {
    tmp.path()
        .canonicalize()
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

#[test]
fn help_lists_subcommands() {
    como()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tree"))
        .stdout(predicate::str::contains("files"));
}

#[test]
fn version_prints_package_version() {
    como()
        .arg("version")
        .assert()
        .success()
        .stdout(format!("como version {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn tree_renders_selection_with_ignores() {
    let tmp = project();
    let expected = format!("{}/\n├── a.txt\n└── sub/\n    └── b.txt\n", label(&tmp));

    como()
        .args(["tree", "-i", "*.log", "-d"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn tree_of_empty_directory_prints_root_only() {
    let tmp = TempDir::new().unwrap();
    como()
        .args(["-q", "tree", "-d"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(format!("{}/\n", label(&tmp)));
}

#[test]
fn all_writes_structure_then_file_blocks() {
    let tmp = project();
    let expected = format!(
        "--- START FILE: PROJECT STRUCTURE ---\n{}/\n├── a.txt\n└── sub/\n    └── b.txt\n\n--- END FILE: PROJECT STRUCTURE ---\n\n\
         --- START FILE: a.txt ---\nalpha\n--- END FILE: a.txt ---\n\n\
         --- START FILE: sub/b.txt ---\nbeta\n--- END FILE: sub/b.txt ---\n\n",
        label(&tmp)
    );

    como()
        .args(["all", "--ignore", "*.log", "-d"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn files_concatenates_only_matching_arguments() {
    let tmp = project();
    como()
        .args(["files", "-d"])
        .arg(tmp.path())
        .args(["sub/*.txt", "missing.txt"])
        .assert()
        .success()
        .stdout("--- START FILE: sub/b.txt ---\nbeta\n--- END FILE: sub/b.txt ---\n\n");
}

#[test]
fn files_requires_an_argument() {
    como().arg("files").assert().failure();
}

#[test]
fn binary_files_are_skipped_unless_included() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("blob.bin"), b"ab\0cd").unwrap();

    como()
        .args(["files", "-d"])
        .arg(tmp.path())
        .arg("blob.bin")
        .assert()
        .success()
        .stdout("");

    como()
        .args(["files", "--include-binary", "-d"])
        .arg(tmp.path())
        .arg("blob.bin")
        .assert()
        .success()
        .stdout("--- START FILE: blob.bin ---\n\n--- END FILE: blob.bin ---\n\n");
}

#[test]
fn invalid_ignore_pattern_exits_with_code_five() {
    let tmp = project();
    como()
        .args(["tree", "-i", "[abc", "-d"])
        .arg(tmp.path())
        .assert()
        .code(5)
        .stdout("")
        .stderr(predicate::str::contains("[abc"));
}

#[test]
fn missing_root_exits_with_code_two() {
    let tmp = TempDir::new().unwrap();
    como()
        .args(["tree", "-d"])
        .arg(tmp.path().join("nope"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn output_file_parents_are_created() {
    let tmp = project();
    let out = tmp.path().join("out/nested/ctx.txt");

    como()
        .args(["-q", "files", "-o"])
        .arg(&out)
        .arg("-d")
        .arg(tmp.path())
        .arg("a.txt")
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        fs::read_to_string(out).unwrap(),
        "--- START FILE: a.txt ---\nalpha\n--- END FILE: a.txt ---\n\n"
    );
}

#[test]
fn config_file_patterns_and_disable_flag() {
    let tmp = project();
    write(tmp.path(), ".como.toml", "[ignore]\npatterns = [\"*.log\", \".como.toml\"]\n");

    como()
        .args(["list", "-d"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("a.txt\nsub/b.txt\n");

    como()
        .args(["list", "--no-config", "-d"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(".como.toml\na.txt\ndebug.log\nsub/b.txt\n");
}

#[test]
fn list_json_reports_relative_paths() {
    let tmp = project();
    como()
        .args(["list", "--json", "--dirs", "-i", "*.log", "-d"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"relativePath\": \"sub\""))
        .stdout(predicate::str::contains("\"isDir\": true"));
}

#[test]
fn project_root_env_is_used_without_dir_flag() {
    let tmp = project();
    como()
        .env("PROJECT_ROOT", tmp.path())
        .args(["list", "-i", "*.log,sub/"])
        .assert()
        .success()
        .stdout("a.txt\n");
}
