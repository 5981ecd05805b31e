use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Project analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Docker generation failed: {0}")]
    Generation(#[from] GeneratorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid project path: {path}")]
    InvalidPath { path: PathBuf },

    #[error("Permission denied when reading {path}")]
    PermissionDenied { path: PathBuf },

    #[error("File exceeds the size limit: {path}")]
    FileTooLarge { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Output file creation failed: {path}")]
    OutputCreation { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {reason}")]
    LoadFailed { reason: String },

    #[error("Failed to save configuration file: {reason}")]
    SaveFailed { reason: String },

    #[error("Invalid configuration: {message}")]
    Validation { message: String },
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
