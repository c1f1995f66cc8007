use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the instruction prompt to hand to an LLM
    Prompt {
        /// Prompt version, e.g. v0.1 (defaults to the configured or current version)
        #[clap(short, long)]
        version: Option<String>,
    },
    /// List the supported prompt versions
    Versions,
    /// Parse change-request markup from a file or stdin
    Parse {
        /// Markup file; reads stdin when omitted or "-"
        file: Option<PathBuf>,
        /// Print the parsed change request as JSON
        #[clap(long, conflicts_with = "normalize")]
        json: bool,
        /// Print the change request re-rendered as canonical markup
        #[clap(long)]
        normalize: bool,
    },
    /// Print a sample configuration file
    Init,
}
