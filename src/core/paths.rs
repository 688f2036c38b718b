use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static FAMSA_EXPORT_HOME: OnceLock<PathBuf> = OnceLock::new();
static FAMSA_EXPORT_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static FAMSA_EXPORT_TOOLS_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the famsa-export home directory
/// Checks FAMSA_EXPORT_HOME environment variable, falls back to ${HOME}/.famsa-export
pub fn famsa_export_home() -> PathBuf {
    FAMSA_EXPORT_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("FAMSA_EXPORT_HOME") {
                PathBuf::from(path)
            } else {
                let home = std::env::var("HOME").unwrap_or_else(|_| {
                    std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string())
                });
                PathBuf::from(home).join(".famsa-export")
            }
        })
        .clone()
}

/// Get the famsa-export data directory
/// Checks FAMSA_EXPORT_DATA_DIR environment variable, falls back to FAMSA_EXPORT_HOME
pub fn famsa_export_data_dir() -> PathBuf {
    FAMSA_EXPORT_DATA_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("FAMSA_EXPORT_DATA_DIR") {
                PathBuf::from(path)
            } else {
                famsa_export_home()
            }
        })
        .clone()
}

/// Get the tools directory
/// Checks FAMSA_EXPORT_TOOLS_DIR environment variable, falls back to FAMSA_EXPORT_DATA_DIR/tools
pub fn famsa_export_tools_dir() -> PathBuf {
    FAMSA_EXPORT_TOOLS_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("FAMSA_EXPORT_TOOLS_DIR") {
                PathBuf::from(path)
            } else {
                famsa_export_data_dir().join("tools")
            }
        })
        .clone()
}

/// Check if running in a custom data directory
pub fn is_custom_data_dir() -> bool {
    std::env::var("FAMSA_EXPORT_DATA_DIR").is_ok() || std::env::var("FAMSA_EXPORT_HOME").is_ok()
}
