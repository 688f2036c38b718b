//! Option translation and file handoff for FAMSA exports.
//!
//! The wrapper owns exactly three decisions: which `-gt` code a tree
//! algorithm maps to, what the output file is called, and where the
//! produced file is published. Everything else is FAMSA's business.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::tools::famsa::FamsaRunner;
use crate::FamsaExportError;

/// Guide trees are written in the Newick format with the Clustal `.dnd` convention.
pub const GUIDE_TREE_EXTENSION: &str = ".dnd";

/// Distance matrices are written as CSV.
pub const DISTANCE_EXTENSION: &str = ".csv";

/// Remote destination prefix exported files are published under.
pub const REMOTE_EXPORT_PREFIX: &str = "FAMSA-Exports";

pub const DEFAULT_GUIDE_TREE_BASE: &str = "custom_guide_tree";
pub const DEFAULT_DISTANCE_BASE: &str = "distance_matrix";

/// Guide tree construction algorithms supported by FAMSA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuideTreeAlgorithm {
    #[default]
    SingleLinkage,
    Upgma,
    NeighborJoining,
}

impl GuideTreeAlgorithm {
    /// FAMSA `-gt` option code.
    pub fn code(&self) -> &'static str {
        match self {
            GuideTreeAlgorithm::SingleLinkage => "sl",
            GuideTreeAlgorithm::Upgma => "upgma",
            GuideTreeAlgorithm::NeighborJoining => "nj",
        }
    }

    /// Human-readable label shown in summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            GuideTreeAlgorithm::SingleLinkage => "Single Linkage Tree",
            GuideTreeAlgorithm::Upgma => "UPGMA",
            GuideTreeAlgorithm::NeighborJoining => "Neighbor Joining Tree",
        }
    }
}

impl fmt::Display for GuideTreeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for GuideTreeAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sl" | "single-linkage" | "single_linkage" => Ok(GuideTreeAlgorithm::SingleLinkage),
            "upgma" => Ok(GuideTreeAlgorithm::Upgma),
            "nj" | "neighbor-joining" | "neighbour-joining" => Ok(GuideTreeAlgorithm::NeighborJoining),
            _ => anyhow::bail!(
                "Unknown guide tree algorithm: {} (expected sl, upgma, or nj)",
                s
            ),
        }
    }
}

/// What FAMSA's `-dist_export` mode writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMatrixKind {
    #[default]
    Distance,
    PairwiseIdentity,
}

impl DistanceMatrixKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            DistanceMatrixKind::Distance => "Distance Matrix",
            DistanceMatrixKind::PairwiseIdentity => "Pairwise Identity Matrix",
        }
    }
}

impl fmt::Display for DistanceMatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Handle to a produced export: the local file plus the managed remote
/// destination it is published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub local_path: PathBuf,
    pub remote_path: String,
}

impl ExportedFile {
    /// Wrap a local output file. The remote path is the fixed export
    /// prefix plus the filename; collisions overwrite.
    pub fn new(local_path: PathBuf) -> Self {
        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let remote_path = format!("{}/{}", REMOTE_EXPORT_PREFIX, file_name);
        Self {
            local_path,
            remote_path,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.local_path.file_name().and_then(|n| n.to_str())
    }
}

/// Reject output names that would escape the working directory or be
/// swallowed as a FAMSA option.
pub fn validate_base_name(base: &str) -> crate::Result<()> {
    if base.is_empty() {
        return Err(FamsaExportError::Config(
            "output name must not be empty".to_string(),
        ));
    }
    if base.contains('/') || base.contains('\\') || base.contains("..") {
        return Err(FamsaExportError::Config(format!(
            "output name must not contain path components: {}",
            base
        )));
    }
    if base.starts_with('-') {
        return Err(FamsaExportError::Config(format!(
            "output name must not start with '-': {}",
            base
        )));
    }
    Ok(())
}

/// Compute the guide tree filename for an output base name.
pub fn guide_tree_filename(base: &str) -> String {
    format!("{}{}", base, GUIDE_TREE_EXTENSION)
}

/// Compute the distance matrix filename for an output base name.
pub fn distance_filename(base: &str) -> String {
    format!("{}{}", base, DISTANCE_EXTENSION)
}

/// Export a guide tree for `input` into `output_dir`.
///
/// The input is resolved to an absolute path before handoff; its content
/// is not validated here, malformed FASTA is FAMSA's to reject.
pub fn export_guide_tree(
    runner: &FamsaRunner,
    input: &Path,
    base_name: &str,
    algorithm: GuideTreeAlgorithm,
    output_dir: &Path,
) -> Result<ExportedFile> {
    validate_base_name(base_name)?;

    let input_path = input
        .canonicalize()
        .with_context(|| format!("cannot resolve input file {:?}", input))?;
    let output_path = output_dir.join(guide_tree_filename(base_name));

    runner.export_guide_tree(&input_path, &output_path, algorithm)?;

    Ok(ExportedFile::new(output_path))
}

/// Export a distance matrix for `input` into `output_dir`.
pub fn export_distance_matrix(
    runner: &FamsaRunner,
    input: &Path,
    base_name: &str,
    kind: DistanceMatrixKind,
    output_dir: &Path,
) -> Result<ExportedFile> {
    validate_base_name(base_name)?;

    let input_path = input
        .canonicalize()
        .with_context(|| format!("cannot resolve input file {:?}", input))?;
    let output_path = output_dir.join(distance_filename(base_name));

    runner.export_distance_matrix(&input_path, &output_path, kind)?;

    Ok(ExportedFile::new(output_path))
}
