use anyhow::{Context, Result};
use como_core::{determine_project_root, render_tree, root_label_for, select};

use super::selection_options;
use crate::cli_args::TreeArgs;
use crate::load_config_for_command;
use crate::output::{OutputTarget, write_text};

pub fn handle_tree_command(args: TreeArgs, quiet: bool) -> Result<()> {
    let project_root = determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(&project_root, &args.project_config, &args.ignore, None)
        .context("Failed to load configuration for tree command")?;

    let options = selection_options(&project_root, &config).include_dirs(true);
    let entries = select(&options).context("Failed to list project entries")?;
    if entries.is_empty() {
        log::warn!("Project is empty or all files are ignored.");
    }

    let rendered = render_tree(&entries, &root_label_for(&project_root));

    let target = OutputTarget::from_arg(args.output.output.as_deref());
    let mut writer = target.open()?;
    write_text(&mut writer, &rendered, &target)?;
    target.finish(writer, quiet)
}
