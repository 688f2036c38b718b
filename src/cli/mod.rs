pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "famsa-export",
    version,
    about = "Export FAMSA guide trees and distance matrices",
    long_about = "famsa-export wraps the FAMSA multiple sequence aligner to export \
                  phylogenetic guide trees in the Newick format and pairwise distance \
                  matrices as CSV, publishing results under a managed export path."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of FAMSA threads (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a guide tree in the Newick format
    GuideTree(commands::guide_tree::GuideTreeArgs),

    /// Export a distance matrix as CSV
    Distance(commands::distance::DistanceArgs),

    /// Manage the FAMSA binary
    Tools(commands::tools::ToolsArgs),
}
