use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectConfigOpts {
    #[arg(
        short = 'd',
        long = "dir",
        help = "Path to the project directory (default: $PROJECT_ROOT or current dir).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        long,
        help = "Path of the TOML config file (default: <project>/.como.toml).",
        value_name = "CONFIG_FILE",
        conflicts_with = "no_config",
        help_heading = "Project Setup"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config",
        help_heading = "Project Setup"
    )]
    pub no_config: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputOpts {
    #[arg(
        short = 'o',
        long,
        help = "Output file path (default: stdout, use '-' for stdout). Parent directories are created.",
        value_name = "PATH",
        help_heading = "Output Control"
    )]
    pub output: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct IgnoreOpts {
    #[arg(
        short = 'i',
        long = "ignore",
        id = "ignore_patterns",
        value_name = "PATTERN",
        action = clap::ArgAction::Append,
        value_delimiter = ',',
        help = "Glob pattern of files/directories to ignore (repeatable, comma-separated).",
        help_heading = "Ignore Rules"
    )]
    pub patterns: Vec<String>,

    #[arg(
        long,
        help = "Respect the project's .gitignore [default: enabled].",
        overrides_with = "disable_gitignore",
        help_heading = "Ignore Rules"
    )]
    pub enable_gitignore: bool,
    #[arg(
        long,
        help = "Do not apply the project's .gitignore rules.",
        overrides_with = "enable_gitignore",
        help_heading = "Ignore Rules"
    )]
    pub disable_gitignore: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BinaryToggles {
    #[arg(
        long,
        help = "Skip binary files when concatenating [default: enabled].",
        overrides_with = "include_binary",
        help_heading = "Concatenation"
    )]
    pub skip_binary: bool,
    #[arg(
        long,
        help = "Include binary files when concatenating.",
        overrides_with = "skip_binary",
        help_heading = "Concatenation"
    )]
    pub include_binary: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "como",
    author,
    version,
    about = "Generate project context for LLMs.",
    long_about = "como lists, filters and concatenates project files into a single text artifact, \nrespecting .gitignore and custom ignore patterns. It can also print the project structure as a tree.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  como tree -d ./my-project\n  como all -i '*.log' -o context.txt\n  como files 'src/**/*.rs' README.md",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv, -vvv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(visible_alias = "t", about = "Generate a file tree listing of the project.")]
    Tree(TreeArgs),

    #[command(
        visible_alias = "a",
        about = "Concatenate all relevant project files, preceded by the project structure."
    )]
    All(AllArgs),

    #[command(
        visible_alias = "f",
        about = "Concatenate the given files or glob patterns."
    )]
    Files(FilesArgs),

    #[command(visible_alias = "l", about = "List the paths that would be selected.")]
    List(ListArgs),

    #[command(about = "Print shell completion scripts.")]
    Completion(CompletionArgs),

    #[command(about = "Print the version number of como.")]
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub output: OutputOpts,
    #[clap(flatten)]
    pub ignore: IgnoreOpts,
}

#[derive(Args, Debug, Clone)]
pub struct AllArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub output: OutputOpts,
    #[clap(flatten)]
    pub ignore: IgnoreOpts,
    #[clap(flatten)]
    pub binary: BinaryToggles,
}

#[derive(Args, Debug, Clone)]
pub struct FilesArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub output: OutputOpts,
    #[clap(flatten)]
    pub ignore: IgnoreOpts,
    #[clap(flatten)]
    pub binary: BinaryToggles,

    #[arg(
        required = true,
        num_args = 1..,
        value_name = "FILE_OR_GLOB",
        help = "Files or glob patterns, relative to --dir (e.g., 'src/**/*.rs', 'README.md')"
    )]
    pub patterns: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub output: OutputOpts,
    #[clap(flatten)]
    pub ignore: IgnoreOpts,

    #[arg(long, help = "Include directories in the listing.")]
    pub dirs: bool,

    #[arg(long, help = "Print the selection as JSON.")]
    pub json: bool,

    #[arg(
        value_name = "FILE_OR_GLOB",
        help = "Restrict the listing to these files or glob patterns."
    )]
    pub patterns: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(
        long,
        value_name = "SHELL",
        help = "Shell to generate completions for (fish, bash, zsh) [default: fish]"
    )]
    pub shell: Option<String>,
}
