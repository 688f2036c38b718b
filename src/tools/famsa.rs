use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use crate::export::{DistanceMatrixKind, GuideTreeAlgorithm};
use crate::FamsaExportError;

/// FAMSA aligner integration.
///
/// Each export is exactly one blocking child process; FAMSA parallelizes
/// internally through its `-t` option. The child is always waited on, its
/// exit status inspected, and the output file verified before a handle is
/// handed back.
pub struct FamsaRunner {
    binary_path: PathBuf,
    threads: usize,
}

impl FamsaRunner {
    /// Create a new runner for the FAMSA binary at `binary_path`.
    pub fn new(binary_path: PathBuf) -> Result<Self> {
        if !binary_path.exists() {
            anyhow::bail!("FAMSA binary not found at {:?}", binary_path);
        }

        Ok(Self {
            binary_path,
            threads: num_cpus::get(),
        })
    }

    /// Set the FAMSA thread count (0 = all available).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = if threads == 0 {
            num_cpus::get()
        } else {
            threads
        };
        self
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Check that FAMSA runs and report its banner line.
    ///
    /// FAMSA prints its usage banner and exits nonzero when invoked without
    /// arguments; the banner is still the version source.
    pub fn check_version(&self) -> Result<String> {
        let output = Command::new(&self.binary_path)
            .output()
            .context("Failed to run FAMSA")?;

        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };

        let banner = text
            .lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
            .trim()
            .to_string();

        if banner.is_empty() {
            anyhow::bail!("FAMSA produced no output at {:?}", self.binary_path);
        }

        Ok(banner)
    }

    fn guide_tree_args(
        &self,
        input: &Path,
        output_file: &Path,
        algorithm: GuideTreeAlgorithm,
    ) -> Vec<OsString> {
        vec![
            OsString::from("-t"),
            OsString::from(self.threads.to_string()),
            OsString::from("-gt"),
            OsString::from(algorithm.code()),
            OsString::from("-gt_export"),
            input.as_os_str().to_os_string(),
            output_file.as_os_str().to_os_string(),
        ]
    }

    fn distance_args(
        &self,
        input: &Path,
        output_file: &Path,
        kind: DistanceMatrixKind,
    ) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("-t"),
            OsString::from(self.threads.to_string()),
            OsString::from("-dist_export"),
        ];
        if kind == DistanceMatrixKind::PairwiseIdentity {
            args.push(OsString::from("-pid"));
        }
        args.push(input.as_os_str().to_os_string());
        args.push(output_file.as_os_str().to_os_string());
        args
    }

    /// Compute a guide tree for `input` and write it to `output_file`.
    pub fn export_guide_tree(
        &self,
        input: &Path,
        output_file: &Path,
        algorithm: GuideTreeAlgorithm,
    ) -> Result<()> {
        let args = self.guide_tree_args(input, output_file, algorithm);
        self.run_export(&args, output_file, "guide tree")
    }

    /// Compute a distance matrix for `input` and write it to `output_file`.
    pub fn export_distance_matrix(
        &self,
        input: &Path,
        output_file: &Path,
        kind: DistanceMatrixKind,
    ) -> Result<()> {
        let args = self.distance_args(input, output_file, kind);
        self.run_export(&args, output_file, "distance matrix")
    }

    fn run_export(&self, args: &[OsString], output_file: &Path, what: &str) -> Result<()> {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!("Running {:?}", cmd);

        let output = cmd
            .output()
            .with_context(|| format!("Failed to start FAMSA at {:?}", self.binary_path))?;

        // FAMSA reports progress on stderr; keep it available for debugging
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            debug!(target: "famsa", "{}", line);
        }

        if !output.status.success() {
            return Err(FamsaExportError::Export(format!(
                "FAMSA {} export failed with exit code {:?}",
                what,
                output.status.code()
            ))
            .into());
        }

        if !output_file.exists() {
            return Err(FamsaExportError::Export(format!(
                "FAMSA exited successfully but the {} file was not created at {:?}",
                what, output_file
            ))
            .into());
        }

        Ok(())
    }
}
