//! Express.js project inspection
//!
//! Pulls project facts out of package.json and a light scan of the entry
//! file: whether Express is present, which known middleware packages are
//! wired in, whether the project uses TypeScript, and which port the
//! application listens on.

use crate::analyzer::AnalysisConfig;
use crate::common::file_utils;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Middleware packages the analyzer reports when present in either
/// dependency table.
const KNOWN_MIDDLEWARE: &[&str] = &[
    "body-parser",
    "cors",
    "helmet",
    "morgan",
    "compression",
    "express-session",
];

static ENV_PORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"PORT\s*=\s*(\d+)").unwrap());
static LISTEN_PORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.listen\s*\(\s*(\d{1,5})").unwrap());

/// Facts about an Express.js project, computed once per analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressFacts {
    /// Express present in either dependency table
    pub has_express: bool,
    /// Declared Express version range, if any
    pub version: Option<String>,
    /// Entry file from package.json `main`, falling back to `index.js`
    pub main_file: Option<String>,
    /// Detected listen port, when one could be found
    pub port: Option<u16>,
    /// Recognized middleware packages, in a fixed reporting order
    pub middleware: Vec<String>,
    /// TypeScript present in either dependency table
    pub has_typescript: bool,
}

/// Reads and parses `<root>/package.json`.
///
/// Returns `None` when the file does not exist. A file that exists but does
/// not parse is logged and treated as an empty manifest, so analysis can
/// still report what else it finds.
pub fn read_package_json(project_root: &Path) -> Option<Value> {
    let path = project_root.join("package.json");
    let content = std::fs::read_to_string(&path).ok()?;

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            Some(Value::Object(Default::default()))
        }
    }
}

/// Checks the runtime `dependencies` table only.
pub fn has_runtime_dependency(package_json: &Value, name: &str) -> bool {
    package_json
        .get("dependencies")
        .and_then(|deps| deps.get(name))
        .is_some()
}

/// Computes Express facts from an already-read package.json.
///
/// `None` means the project has no package.json and yields default facts.
pub fn analyze_express_facts(
    project_root: &Path,
    package_json: Option<&Value>,
    config: &AnalysisConfig,
) -> ExpressFacts {
    let package_json = match package_json {
        Some(value) => value,
        None => return ExpressFacts::default(),
    };

    let runtime_deps = dependency_map(package_json, "dependencies");
    let dev_deps = dependency_map(package_json, "devDependencies");

    // Dev entries shadow runtime entries, same as merging the two tables
    let mut all_deps = runtime_deps;
    all_deps.extend(dev_deps);

    let version = all_deps.get("express").cloned();
    let has_express = version.is_some();
    let has_typescript = all_deps.contains_key("typescript");

    let main_file = package_json
        .get("main")
        .and_then(|m| m.as_str())
        .unwrap_or("index.js")
        .to_string();

    let middleware: Vec<String> = KNOWN_MIDDLEWARE
        .iter()
        .filter(|name| all_deps.contains_key(**name))
        .map(|name| name.to_string())
        .collect();

    let port = detect_port(project_root, &main_file, config);

    ExpressFacts {
        has_express,
        version,
        main_file: Some(main_file),
        port,
        middleware,
        has_typescript,
    }
}

fn dependency_map(package_json: &Value, key: &str) -> HashMap<String, String> {
    package_json
        .get(key)
        .and_then(|deps| deps.as_object())
        .map(|deps| {
            deps.iter()
                .filter_map(|(name, version)| {
                    version.as_str().map(|v| (name.clone(), v.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Best-effort port detection: a `PORT=` assignment in `.env` wins, then
/// the first `.listen(<number>)` call in the entry file.
fn detect_port(project_root: &Path, main_file: &str, config: &AnalysisConfig) -> Option<u16> {
    if let Ok(content) = std::fs::read_to_string(project_root.join(".env")) {
        if let Some(port) = ENV_PORT
            .captures(&content)
            .and_then(|c| c[1].parse().ok())
        {
            return Some(port);
        }
    }

    let main_path = project_root.join(main_file);
    if let Ok(content) = file_utils::read_file_safe(&main_path, config.max_file_size) {
        if let Some(port) = LISTEN_PORT
            .captures(&content)
            .and_then(|c| c[1].parse().ok())
        {
            return Some(port);
        }
    }

    None
}
