use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Read releases from a saved GitHub API response instead of the network
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub releases_file: Option<PathBuf>,

    /// Set proxy
    #[arg(required = false, long, short = 'P', global = true)]
    pub proxy: Option<String>,

    /// Set user agent
    #[arg(required = false, long, short = 'A', global = true)]
    pub user_agent: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a single repository resource
    #[command(arg_required_else_help = true)]
    Render {
        /// Resource name, e.g. `<repo>.db`, `<repo>.files.sig` or `packages.txt`
        #[arg(required = true)]
        resource: String,

        /// Write the body to this file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// List packages served by the repository
    #[clap(name = "list", visible_alias = "ls")]
    List {
        /// Include packages beyond the retention limit
        #[arg(short, long)]
        all: bool,
    },

    /// Write every repository resource into a directory
    #[command(arg_required_else_help = true)]
    Mirror {
        /// Target directory
        #[arg(required = true, value_hint = ValueHint::DirPath)]
        dir: PathBuf,
    },

    /// Print the default configuration
    #[clap(name = "defconfig")]
    DefConfig,
}
