use anyhow::{Context, Result};
use colored::*;
use como_core::{determine_project_root, select, write_concatenation};

use super::selection_options;
use crate::cli_args::FilesArgs;
use crate::load_config_for_command;
use crate::output::OutputTarget;

pub fn handle_files_command(args: FilesArgs, quiet: bool) -> Result<()> {
    let project_root = determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(
        &project_root,
        &args.project_config,
        &args.ignore,
        Some(&args.binary),
    )
    .context("Failed to load configuration for files command")?;

    let options = selection_options(&project_root, &config).explicit_args(args.patterns.clone());
    let files = select(&options).context("Failed to resolve file arguments")?;
    if files.is_empty() {
        if !quiet {
            eprintln!(
                "{}",
                "No files matched the given arguments after applying ignores.".yellow()
            );
        }
        return Ok(());
    }
    for file in &files {
        log::debug!("Concatenating: {}", file.normalized());
    }

    let target = OutputTarget::from_arg(args.output.output.as_deref());
    let destination = target.destination();
    let mut writer = target.open()?;
    let summary = write_concatenation(&mut writer, &files, config.general.skip_binary, &destination)?;
    log::info!(
        "Concatenated {} files ({} binary skipped, {} unreadable).",
        summary.written,
        summary.skipped_binary,
        summary.failed
    );
    target.finish(writer, quiet)
}
