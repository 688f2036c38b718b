pub mod famsa;
pub mod tool_manager;

pub use tool_manager::{ToolInfo, ToolManager};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::FamsaExportError;

/// External tools managed by famsa-export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Famsa,
}

impl Tool {
    /// Get the name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Famsa => "famsa",
        }
    }

    /// Get the display name of the tool
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Famsa => "FAMSA",
        }
    }

    /// Get the GitHub repository for the tool
    pub fn github_repo(&self) -> &'static str {
        match self {
            Tool::Famsa => "refresh-bio/FAMSA",
        }
    }

    /// Get the binary name for the tool
    pub fn binary_name(&self) -> &'static str {
        match self {
            Tool::Famsa => "famsa",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Tool {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "famsa" => Ok(Tool::Famsa),
            _ => anyhow::bail!("Unknown tool: {}", s),
        }
    }
}

/// Conventional location of a pre-built FAMSA checkout, kept for workflow
/// images that ship the binary next to the task.
pub const BUNDLED_FAMSA_PATH: &str = "FAMSA/famsa";

/// Resolve the FAMSA binary to invoke.
///
/// Order: an explicit path (flag or `FAMSA_EXPORT_BIN`), the managed
/// `current` install, then the bundled relative path.
pub fn resolve_famsa_binary(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(FamsaExportError::Tool(format!(
            "FAMSA binary not found at {:?}",
            path
        ))
        .into());
    }

    let manager = ToolManager::new()?;
    if let Some(path) = manager.get_tool_path(Tool::Famsa) {
        return Ok(path);
    }

    let bundled = PathBuf::from(BUNDLED_FAMSA_PATH);
    if bundled.exists() {
        return Ok(bundled);
    }

    Err(FamsaExportError::Tool(
        "FAMSA is not installed. Run: famsa-export tools install famsa, or pass --famsa-path"
            .to_string(),
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tool_names() {
        assert_eq!(Tool::Famsa.name(), "famsa");
        assert_eq!(Tool::Famsa.display_name(), "FAMSA");
        assert_eq!(Tool::Famsa.binary_name(), "famsa");
        assert_eq!(Tool::Famsa.github_repo(), "refresh-bio/FAMSA");
    }

    #[test]
    fn test_tool_parsing() {
        assert_eq!("famsa".parse::<Tool>().unwrap(), Tool::Famsa);
        assert_eq!("FAMSA".parse::<Tool>().unwrap(), Tool::Famsa);
        assert!("clustalo".parse::<Tool>().is_err());
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("famsa");
        std::fs::write(&binary, "#!/bin/sh\n").unwrap();

        let resolved = resolve_famsa_binary(Some(&binary)).unwrap();
        assert_eq!(resolved, binary);

        let missing = dir.path().join("nope");
        assert!(resolve_famsa_binary(Some(&missing)).is_err());
    }
}
