pub mod build;
pub mod colour;
pub mod completions;
pub mod list;

use clap::{Parser, Subcommand};

/// retint - Recoloured theme and icon set generator
#[derive(Parser, Debug)]
#[command(name = "retint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print per-file detail
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate recoloured themes and icon sets
    Build(build::BuildArgs),

    /// Print colour variants or a set's substitution table
    Colour(colour::ColourArgs),

    /// List known theme and icon sets
    List(list::ListArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Exit code for a failed parse: 0 for `--help`/`--version`, 1 for any
/// usage error, matching the code of every other failure.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.exit_code() == 0 {
        0
    } else {
        1
    }
}
