use anyhow::{Context, Result};
use colored::*;
use como_core::{
    determine_project_root, render_tree, root_label_for, select, write_concatenation,
    write_structure_block,
};

use super::selection_options;
use crate::cli_args::AllArgs;
use crate::load_config_for_command;
use crate::output::OutputTarget;

pub fn handle_all_command(args: AllArgs, quiet: bool) -> Result<()> {
    let project_root = determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(
        &project_root,
        &args.project_config,
        &args.ignore,
        Some(&args.binary),
    )
    .context("Failed to load configuration for all command")?;

    let options = selection_options(&project_root, &config);
    let files = select(&options).context("Failed to list project files")?;
    if files.is_empty() {
        if !quiet {
            eprintln!(
                "{}",
                "No files found to process after applying ignores.".yellow()
            );
        }
        return Ok(());
    }
    log::info!("Found {} files to concatenate.", files.len());

    let structure = select(&options.include_dirs(true)).context("Failed to list project entries")?;
    let rendered = render_tree(&structure, &root_label_for(&project_root));

    let target = OutputTarget::from_arg(args.output.output.as_deref());
    let destination = target.destination();
    let mut writer = target.open()?;
    write_structure_block(&mut writer, &rendered, &destination)?;
    let summary = write_concatenation(&mut writer, &files, config.general.skip_binary, &destination)?;
    log::info!(
        "Concatenated {} files ({} binary skipped, {} unreadable).",
        summary.written,
        summary.skipped_binary,
        summary.failed
    );
    target.finish(writer, quiet)
}
