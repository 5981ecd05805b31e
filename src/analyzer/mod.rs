//! # Analyzer Module
//!
//! This module provides project analysis capabilities for detecting:
//! - Express.js usage, middleware, and TypeScript support
//! - Environment variables declared in `.env` files
//! - Backing services implied by environment variable names
//! - The port the application listens on

use crate::error::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod display;
pub mod environment;
pub mod express;
pub mod services;

// Re-export environment analysis types
pub use environment::{analyze_environment, parse_env_file, EnvVariables, EnvironmentConfig};

// Re-export service classification types
pub use services::{classify_services, ServiceDescriptor, ServiceKind};

// Re-export Express analysis types
pub use express::{analyze_express_facts, ExpressFacts};

/// Represents the detected project type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Express,
    Unknown,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Express => "express",
            ProjectType::Unknown => "unknown",
        }
    }
}

/// Complete result of analyzing a project directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectAnalysis {
    pub project_root: PathBuf,
    pub project_type: ProjectType,
    pub has_package_json: bool,
    pub express: ExpressFacts,
    pub environment: EnvironmentConfig,
    pub analysis_metadata: AnalysisMetadata,
}

/// Metadata about the analysis process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisMetadata {
    pub timestamp: String,
    pub analyzer_version: String,
    pub analysis_duration_ms: u64,
}

/// Configuration for project analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub max_file_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024, // 1MB
        }
    }
}

/// Analyzes a project directory for Express.js facts and backing services.
///
/// # Arguments
/// * `path` - The root directory of the project to analyze
///
/// # Returns
/// A `ProjectAnalysis` describing what was found, or an error
///
/// # Examples
/// ```no_run
/// use devenv_bootstrap::analyzer::analyze_project;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let analysis = analyze_project(Path::new("./my-app"))?;
/// println!("Project type: {}", analysis.project_type.as_str());
/// # Ok(())
/// # }
/// ```
pub fn analyze_project(path: &Path) -> Result<ProjectAnalysis> {
    analyze_project_with_config(path, &AnalysisConfig::default())
}

/// Analyzes a project with custom configuration
pub fn analyze_project_with_config(path: &Path, config: &AnalysisConfig) -> Result<ProjectAnalysis> {
    let start_time = std::time::Instant::now();

    // Validate project path
    let project_root = crate::common::file_utils::validate_project_path(path)?;

    log::info!("Starting analysis of project: {}", project_root.display());

    // Read the manifest once; the project type looks at runtime dependencies
    // only, while the facts below consider both dependency tables
    let package_json = express::read_package_json(&project_root);
    let has_package_json = package_json.is_some();
    let project_type = match package_json.as_ref() {
        Some(pkg) if express::has_runtime_dependency(pkg, "express") => ProjectType::Express,
        _ => ProjectType::Unknown,
    };

    let express = express::analyze_express_facts(&project_root, package_json.as_ref(), config);
    log::debug!(
        "Express facts: has_express={} typescript={} port={:?}",
        express.has_express,
        express.has_typescript,
        express.port
    );

    // A failed environment read should not sink the whole analysis
    let environment = match environment::analyze_environment(&project_root) {
        Ok(env) => env,
        Err(e) => {
            log::error!("Environment analysis failed: {}", e);
            EnvironmentConfig::default()
        }
    };

    let duration = start_time.elapsed();

    let analysis = ProjectAnalysis {
        project_root,
        project_type,
        has_package_json,
        express,
        environment,
        analysis_metadata: AnalysisMetadata {
            timestamp: Utc::now().to_rfc3339(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            analysis_duration_ms: duration.as_millis() as u64,
        },
    };

    log::info!("Analysis completed in {}ms", duration.as_millis());
    Ok(analysis)
}
