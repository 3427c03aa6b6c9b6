mod cli_args;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use std::path::Path;
use std::process;

use cli_args::{BinaryToggles, Cli, Commands, IgnoreOpts, ProjectConfigOpts};
use como_core::{AppError, Config};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let exit_code = exit_code_for(&e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(AppError::Config(_)) => 1,
        Some(AppError::TomlParse(_)) => 1,
        Some(AppError::Io(_)) => 2,
        Some(AppError::RootResolution { .. }) => 2,
        Some(AppError::NotADirectory(_)) => 2,
        Some(AppError::FileRead { .. }) => 2,
        Some(AppError::FileWrite { .. }) => 2,
        Some(AppError::DirCreation { .. }) => 2,
        Some(AppError::InvalidIgnorePattern { .. }) => 5,
        Some(AppError::InvalidArgPattern { .. }) => 5,
        Some(AppError::InvalidArgument(_)) => 5,
        Some(_) => 1,
        None => 1,
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool) -> Result<()> {
    match cli.command {
        None => {
            Cli::command().print_help()?;
        }
        Some(command) => match command {
            Commands::Tree(args) => {
                log::debug!("Executing 'tree' command...");
                commands::tree::handle_tree_command(args, quiet)?;
            }
            Commands::All(args) => {
                log::debug!("Executing 'all' command...");
                commands::all::handle_all_command(args, quiet)?;
            }
            Commands::Files(args) => {
                log::debug!("Executing 'files' command...");
                commands::files::handle_files_command(args, quiet)?;
            }
            Commands::List(args) => {
                log::debug!("Executing 'list' command...");
                commands::list::handle_list_command(args, quiet)?;
            }
            Commands::Completion(args) => {
                log::debug!("Executing 'completion' command...");
                commands::completion::handle_completion_command(&args)?;
            }
            Commands::Version => {
                println!("como version {}", env!("CARGO_PKG_VERSION"));
            }
        },
    }
    Ok(())
}

fn merge_config_with_cli_overrides(
    mut config: Config,
    ignore_opts: &IgnoreOpts,
    binary: Option<&BinaryToggles>,
) -> Config {
    log::trace!("Applying CLI overrides to config...");

    if ignore_opts.disable_gitignore {
        config.general.use_gitignore = false;
    }
    if ignore_opts.enable_gitignore {
        config.general.use_gitignore = true;
    }

    if let Some(toggles) = binary {
        if toggles.include_binary {
            config.general.skip_binary = false;
        }
        if toggles.skip_binary {
            config.general.skip_binary = true;
        }
    }

    config.ignore.patterns = config.effective_ignore_patterns(&ignore_opts.patterns);

    log::trace!("Config after CLI overrides: {:?}", config);
    config
}

/// Loads the project config (if any) and folds the command's flags into it.
/// After this, `config.ignore.patterns` holds the full pattern list.
pub fn load_config_for_command(
    project_root: &Path,
    project_opts: &ProjectConfigOpts,
    ignore_opts: &IgnoreOpts,
    binary: Option<&BinaryToggles>,
) -> Result<Config> {
    let config_path = Config::resolve_config_path(
        project_root,
        project_opts.config.as_ref(),
        project_opts.no_config,
    )
    .context("Failed to resolve configuration path")?;

    let config = match &config_path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    Ok(merge_config_with_cli_overrides(config, ignore_opts, binary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn exit_codes_follow_error_kind() {
        let invalid = anyhow::Error::from(AppError::InvalidArgument("x".into()));
        assert_eq!(exit_code_for(&invalid), 5);

        let missing = anyhow::Error::from(AppError::NotADirectory(PathBuf::from("/nope")))
            .context("Failed to determine project root");
        assert_eq!(exit_code_for(&missing), 2);

        assert_eq!(exit_code_for(&anyhow::anyhow!("plain")), 1);
    }

    #[test]
    fn cli_flags_override_config_values() {
        let mut config = Config::default();
        config.ignore.patterns = vec!["dist/".into()];
        let ignore = IgnoreOpts {
            patterns: vec!["*.log".into()],
            disable_gitignore: true,
            ..IgnoreOpts::default()
        };
        let binary = BinaryToggles {
            include_binary: true,
            ..BinaryToggles::default()
        };

        let merged = merge_config_with_cli_overrides(config, &ignore, Some(&binary));

        assert!(!merged.general.use_gitignore);
        assert!(!merged.general.skip_binary);
        assert_eq!(merged.ignore.patterns, vec!["dist/", "*.log"]);
    }
}
