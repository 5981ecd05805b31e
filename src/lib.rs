//! # DevEnv Bootstrap
//!
//! A Rust-based command-line application that analyzes Express.js projects and
//! bootstraps their Docker development environments, generating Dockerfiles and
//! Docker Compose files from what it finds in the project.
//!
//! ## Features
//!
//! - **Express.js Detection**: Reads package.json to confirm Express and collect
//!   the version, entry point, port and middleware in use
//! - **Environment Analysis**: Parses .env files and recognizes backing services
//!   from environment variable names
//! - **Docker Generation**: Produces Dockerfiles and Compose files tuned for
//!   development or production mode
//! - **Service Wiring**: Detected services become Compose service blocks with
//!   matching images, ports and volumes
//!
//! ## Example
//!
//! ```rust,no_run
//! use devenv_bootstrap::{analyze_project, generate_dockerfile, GeneratorConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let project_path = Path::new("./my-express-app");
//! let analysis = analyze_project(project_path)?;
//!
//! let config = GeneratorConfig {
//!     environment: Some(analysis.environment.clone()),
//!     ..Default::default()
//! };
//! let dockerfile = generate_dockerfile(&analysis.express, &config);
//! println!("{}", dockerfile);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod generator;

// Re-export commonly used types and functions
pub use analyzer::{analyze_project, ProjectAnalysis};
pub use error::{BootstrapError, Result};
pub use generator::{generate_dockerfile, generate_compose, GeneratorConfig};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
