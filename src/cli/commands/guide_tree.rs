use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{info, section_header, success, tree_item};
use crate::export::{self, GuideTreeAlgorithm, DEFAULT_GUIDE_TREE_BASE};
use crate::tools::famsa::FamsaRunner;
use crate::tools::resolve_famsa_binary;
use crate::utils::progress::create_spinner;

#[derive(Args)]
pub struct GuideTreeArgs {
    /// Input FASTA file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output name for the guide tree (".dnd" is appended)
    #[arg(short, long, default_value = DEFAULT_GUIDE_TREE_BASE, value_name = "NAME")]
    pub output: String,

    /// Guide tree algorithm (sl, upgma, nj)
    #[arg(long, default_value = "sl", value_name = "ALGORITHM")]
    pub tree: String,

    /// Directory to write the exported file into
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Path to the FAMSA binary (overrides the managed install)
    #[arg(long, env = "FAMSA_EXPORT_BIN", value_name = "FILE")]
    pub famsa_path: Option<PathBuf>,
}

pub fn run(args: GuideTreeArgs, threads: usize) -> Result<()> {
    let algorithm: GuideTreeAlgorithm = args.tree.parse()?;

    let binary = resolve_famsa_binary(args.famsa_path.as_deref())?;
    let runner = FamsaRunner::new(binary)?.with_threads(threads);

    section_header("Guide Tree Export");
    info(&format!("FAMSA binary: {}", runner.binary_path().display()));

    let pb = create_spinner(&format!("Running FAMSA ({})...", algorithm.display_name()));
    let exported = export::export_guide_tree(
        &runner,
        &args.input,
        &args.output,
        algorithm,
        &args.output_dir,
    )?;
    pb.finish_and_clear();

    tree_item(
        false,
        "Algorithm",
        Some(&format!("{} ({})", algorithm.display_name(), algorithm.code())),
    );
    tree_item(false, "Input", Some(&args.input.display().to_string()));
    tree_item(
        false,
        "Local",
        Some(&exported.local_path.display().to_string()),
    );
    tree_item(true, "Remote", Some(&exported.remote_path));

    success("Guide tree exported");
    Ok(())
}
