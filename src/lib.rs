pub mod cli;
pub mod core;
pub mod export;
pub mod tools;
pub mod utils;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FamsaExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FamsaExportError>;
