use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{info, section_header, success, tree_item};
use crate::export::{self, DistanceMatrixKind, DEFAULT_DISTANCE_BASE};
use crate::tools::famsa::FamsaRunner;
use crate::tools::resolve_famsa_binary;
use crate::utils::progress::create_spinner;

#[derive(Args)]
pub struct DistanceArgs {
    /// Input FASTA file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output name for the matrix (".csv" is appended)
    #[arg(short, long, default_value = DEFAULT_DISTANCE_BASE, value_name = "NAME")]
    pub output: String,

    /// Export pairwise identities instead of distances
    #[arg(long)]
    pub pid: bool,

    /// Directory to write the exported file into
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Path to the FAMSA binary (overrides the managed install)
    #[arg(long, env = "FAMSA_EXPORT_BIN", value_name = "FILE")]
    pub famsa_path: Option<PathBuf>,
}

pub fn run(args: DistanceArgs, threads: usize) -> Result<()> {
    let kind = if args.pid {
        DistanceMatrixKind::PairwiseIdentity
    } else {
        DistanceMatrixKind::Distance
    };

    let binary = resolve_famsa_binary(args.famsa_path.as_deref())?;
    let runner = FamsaRunner::new(binary)?.with_threads(threads);

    section_header("Distance Matrix Export");
    info(&format!("FAMSA binary: {}", runner.binary_path().display()));

    let pb = create_spinner(&format!("Running FAMSA ({})...", kind.display_name()));
    let exported =
        export::export_distance_matrix(&runner, &args.input, &args.output, kind, &args.output_dir)?;
    pb.finish_and_clear();

    tree_item(false, "Matrix", Some(kind.display_name()));
    tree_item(false, "Input", Some(&args.input.display().to_string()));
    tree_item(
        false,
        "Local",
        Some(&exported.local_path.display().to_string()),
    );
    tree_item(true, "Remote", Some(&exported.remote_path));

    success("Distance matrix exported");
    Ok(())
}
