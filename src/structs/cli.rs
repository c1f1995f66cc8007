use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "changecraft")]
#[clap(about = "Instruct LLMs to propose code changes and interpret their change-request markup", long_about = None)]
#[clap(version)]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[clap(long, global = true, env = "CHANGECRAFT_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}
