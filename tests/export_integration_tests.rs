//! End-to-end export tests against a scripted stand-in for the FAMSA binary.
//!
//! The scripts record their argv and either produce the requested output
//! file or fail, so the full invoke-check-handoff path is exercised
//! without a real aligner.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use famsa_export::export::{
    self, DistanceMatrixKind, ExportedFile, GuideTreeAlgorithm, DEFAULT_GUIDE_TREE_BASE,
};
use famsa_export::tools::famsa::FamsaRunner;

const TEST_FASTA: &str = ">seq1 Escherichia coli OX=562
ATGATGATGATGATGATGATGATGATGATGATGATGATGATGATG
>seq2 Salmonella enterica OX=28901
CGCGCGCGCGCGCGCGCGCGCGCGCGCGCGCGCGCGCGCGCGCG
>seq3 Bacillus subtilis OX=1423
TAGTAGTAGTAGTAGTAGTAGTAGTAGTAGTAGTAGTAGTAGTAG
";

/// Write a fake famsa executable that records its argv and writes a
/// Newick stub into its last argument.
fn fake_famsa(dir: &Path) -> Result<PathBuf> {
    let script = dir.join("famsa");
    fs::write(
        &script,
        r#"#!/bin/sh
dir="$(dirname "$0")"
printf '%s\n' "$@" > "$dir/args.txt"
for last; do :; done
printf '(A:0.1,(B:0.2,C:0.3):0.05);\n' > "$last"
"#,
    )?;
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
    Ok(script)
}

/// Write a fake famsa executable that exits with the given code and
/// produces nothing.
fn failing_famsa(dir: &Path, code: i32) -> Result<PathBuf> {
    let script = dir.join("famsa");
    fs::write(&script, format!("#!/bin/sh\nexit {}\n", code))?;
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
    Ok(script)
}

fn recorded_args(dir: &Path) -> Result<Vec<String>> {
    Ok(fs::read_to_string(dir.join("args.txt"))?
        .lines()
        .map(|l| l.to_string())
        .collect())
}

#[test]
fn test_guide_tree_export_end_to_end() -> Result<()> {
    let temp = TempDir::new()?;
    let binary = fake_famsa(temp.path())?;
    let input = temp.path().join("input.fasta");
    fs::write(&input, TEST_FASTA)?;

    let runner = FamsaRunner::new(binary)?.with_threads(1);
    let exported = export::export_guide_tree(
        &runner,
        &input,
        "tree1",
        GuideTreeAlgorithm::Upgma,
        temp.path(),
    )?;

    assert_eq!(exported.file_name(), Some("tree1.dnd"));
    assert_eq!(exported.remote_path, "FAMSA-Exports/tree1.dnd");
    assert!(exported.local_path.exists());

    let tree = fs::read_to_string(&exported.local_path)?;
    assert!(tree.ends_with(");\n"));

    // Exactly one invocation with the fixed argument template
    let args = recorded_args(temp.path())?;
    assert_eq!(args[0..2], ["-t".to_string(), "1".to_string()]);
    assert_eq!(args[2..5], ["-gt".to_string(), "upgma".to_string(), "-gt_export".to_string()]);
    assert_eq!(args[args.len() - 2], input.canonicalize()?.display().to_string());
    assert!(args.last().unwrap().ends_with("tree1.dnd"));

    Ok(())
}

#[test]
fn test_guide_tree_export_defaults() -> Result<()> {
    let temp = TempDir::new()?;
    let binary = fake_famsa(temp.path())?;
    let input = temp.path().join("input.fasta");
    fs::write(&input, TEST_FASTA)?;

    let runner = FamsaRunner::new(binary)?.with_threads(1);
    let exported = export::export_guide_tree(
        &runner,
        &input,
        DEFAULT_GUIDE_TREE_BASE,
        GuideTreeAlgorithm::default(),
        temp.path(),
    )?;

    assert_eq!(exported.file_name(), Some("custom_guide_tree.dnd"));
    assert_eq!(exported.remote_path, "FAMSA-Exports/custom_guide_tree.dnd");

    let args = recorded_args(temp.path())?;
    assert!(args.contains(&"sl".to_string()));

    Ok(())
}

#[test]
fn test_nonzero_exit_is_an_error() -> Result<()> {
    let temp = TempDir::new()?;
    let binary = failing_famsa(temp.path(), 3)?;
    let input = temp.path().join("input.fasta");
    fs::write(&input, TEST_FASTA)?;

    let runner = FamsaRunner::new(binary)?.with_threads(1);
    let err = export::export_guide_tree(
        &runner,
        &input,
        "tree1",
        GuideTreeAlgorithm::SingleLinkage,
        temp.path(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("exit code"));
    assert!(!temp.path().join("tree1.dnd").exists());

    Ok(())
}

#[test]
fn test_missing_output_file_is_an_error() -> Result<()> {
    let temp = TempDir::new()?;
    // Exits cleanly but writes nothing
    let binary = failing_famsa(temp.path(), 0)?;
    let input = temp.path().join("input.fasta");
    fs::write(&input, TEST_FASTA)?;

    let runner = FamsaRunner::new(binary)?.with_threads(1);
    let err = export::export_guide_tree(
        &runner,
        &input,
        "tree1",
        GuideTreeAlgorithm::SingleLinkage,
        temp.path(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("was not created"));

    Ok(())
}

#[test]
fn test_unresolvable_input_is_an_error() -> Result<()> {
    let temp = TempDir::new()?;
    let binary = fake_famsa(temp.path())?;

    let runner = FamsaRunner::new(binary)?.with_threads(1);
    let err = export::export_guide_tree(
        &runner,
        &temp.path().join("missing.fasta"),
        "tree1",
        GuideTreeAlgorithm::SingleLinkage,
        temp.path(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("cannot resolve input file"));

    Ok(())
}

#[test]
fn test_invalid_base_name_never_spawns() -> Result<()> {
    let temp = TempDir::new()?;
    let binary = fake_famsa(temp.path())?;
    let input = temp.path().join("input.fasta");
    fs::write(&input, TEST_FASTA)?;

    let runner = FamsaRunner::new(binary)?.with_threads(1);
    let result = export::export_guide_tree(
        &runner,
        &input,
        "../escape",
        GuideTreeAlgorithm::SingleLinkage,
        temp.path(),
    );

    assert!(result.is_err());
    // The child process never ran
    assert!(!temp.path().join("args.txt").exists());

    Ok(())
}

#[test]
fn test_distance_matrix_export() -> Result<()> {
    let temp = TempDir::new()?;
    let binary = fake_famsa(temp.path())?;
    let input = temp.path().join("input.fasta");
    fs::write(&input, TEST_FASTA)?;

    let runner = FamsaRunner::new(binary)?.with_threads(2);
    let exported = export::export_distance_matrix(
        &runner,
        &input,
        "m1",
        DistanceMatrixKind::Distance,
        temp.path(),
    )?;

    assert_eq!(exported.file_name(), Some("m1.csv"));
    assert_eq!(exported.remote_path, "FAMSA-Exports/m1.csv");

    let args = recorded_args(temp.path())?;
    assert!(args.contains(&"-dist_export".to_string()));
    assert!(!args.contains(&"-pid".to_string()));

    Ok(())
}

#[test]
fn test_pairwise_identity_export_passes_pid() -> Result<()> {
    let temp = TempDir::new()?;
    let binary = fake_famsa(temp.path())?;
    let input = temp.path().join("input.fasta");
    fs::write(&input, TEST_FASTA)?;

    let runner = FamsaRunner::new(binary)?.with_threads(2);
    let exported = export::export_distance_matrix(
        &runner,
        &input,
        "ident",
        DistanceMatrixKind::PairwiseIdentity,
        temp.path(),
    )?;

    assert_eq!(exported.file_name(), Some("ident.csv"));

    let args = recorded_args(temp.path())?;
    assert!(args.contains(&"-dist_export".to_string()));
    assert!(args.contains(&"-pid".to_string()));

    Ok(())
}

#[test]
fn test_rerunning_overwrites_same_filename() -> Result<()> {
    let temp = TempDir::new()?;
    let binary = fake_famsa(temp.path())?;
    let input = temp.path().join("input.fasta");
    fs::write(&input, TEST_FASTA)?;

    let runner = FamsaRunner::new(binary)?.with_threads(1);

    let first = export::export_guide_tree(
        &runner,
        &input,
        "tree1",
        GuideTreeAlgorithm::NeighborJoining,
        temp.path(),
    )?;
    let second = export::export_guide_tree(
        &runner,
        &input,
        "tree1",
        GuideTreeAlgorithm::NeighborJoining,
        temp.path(),
    )?;

    // Same base name, same filename, no accumulating suffix
    assert_eq!(first, second);
    assert_eq!(
        second,
        ExportedFile::new(temp.path().join("tree1.dnd"))
    );

    Ok(())
}
