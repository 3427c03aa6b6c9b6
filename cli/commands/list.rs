use anyhow::{Context, Result};
use como_core::{Entry, determine_project_root, select};

use super::selection_options;
use crate::cli_args::ListArgs;
use crate::load_config_for_command;
use crate::output::{OutputTarget, write_text};

pub fn handle_list_command(args: ListArgs, quiet: bool) -> Result<()> {
    let project_root = determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(&project_root, &args.project_config, &args.ignore, None)
        .context("Failed to load configuration for list command")?;

    let options = selection_options(&project_root, &config)
        .explicit_args(args.patterns.clone())
        .include_dirs(args.dirs);
    let entries = select(&options).context("Failed to list project entries")?;
    log::info!("Selected {} entries.", entries.len());

    let text = if args.json {
        let mut json = serde_json::to_string_pretty(&entries)
            .context("Failed to serialize selection to JSON")?;
        json.push('\n');
        json
    } else {
        format_plain(&entries)
    };

    let target = OutputTarget::from_arg(args.output.output.as_deref());
    let mut writer = target.open()?;
    write_text(&mut writer, &text, &target)?;
    target.finish(writer, quiet)
}

/// One path per line; directories end in `/`, symlinks are annotated.
fn format_plain(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(entry.normalized());
        if entry.is_symlink() {
            out.push_str(" (symlink)");
        } else if entry.is_dir() {
            out.push('/');
        }
        out.push('\n');
    }
    out
}
