//! Environment file analysis
//!
//! Reads a project's `.env` and `.env.example` files, parses the simple
//! `KEY=VALUE` grammar into an ordered variable map, and classifies the
//! variables into backing service descriptors.

use crate::analyzer::services::{classify_services, ServiceDescriptor};
use crate::error::{AnalysisError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

/// Accepted line shape: uppercase key, `=`, then the raw value.
static ENV_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z][A-Z0-9_]*)=(.*)$").unwrap());

/// Ordered key/value mapping parsed from an environment file.
///
/// Keys are unique. Assigning an existing key replaces its value but keeps
/// the key's original position, so iteration (and everything generated from
/// it) follows first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVariables(Vec<(String, String)>);

impl EnvVariables {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts or updates a key. Updates keep the original position.
    pub fn insert(&mut self, key: String, value: String) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k.as_str() == key)
    }

    /// Iterates entries in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for EnvVariables {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut vars = EnvVariables::new();
        for (key, value) in iter {
            vars.insert(key, value);
        }
        vars
    }
}

// Serialized as a JSON object so analysis output mirrors the source file,
// entry order included.
impl Serialize for EnvVariables {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EnvVariables {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EnvVariablesVisitor;

        impl<'de> Visitor<'de> for EnvVariablesVisitor {
            type Value = EnvVariables;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of environment variable names to values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut vars = EnvVariables::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    vars.insert(key, value);
                }
                Ok(vars)
            }
        }

        deserializer.deserialize_map(EnvVariablesVisitor)
    }
}

/// Everything learned from a project's environment files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Variables from `.env`, in file order
    pub variables: EnvVariables,
    /// Whether a readable `.env` was found at the project root
    pub has_env_file: bool,
    /// Backing services inferred from the variable names
    pub services: Vec<ServiceDescriptor>,
}

/// Parses `.env`-style text into an ordered variable mapping.
///
/// Lines are trimmed first; blank lines and `#` comments are skipped.
/// Anything not matching `KEY=VALUE` with an uppercase key is dropped
/// without error. Values keep their string form and are trimmed of
/// surrounding whitespace. A repeated key keeps its first position but
/// takes the last value.
pub fn parse_env_file(content: &str) -> EnvVariables {
    let mut vars = EnvVariables::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(captures) = ENV_LINE.captures(line) {
            let key = captures[1].to_string();
            let value = captures[2].trim().to_string();
            vars.insert(key, value);
        }
    }

    vars
}

/// Reads and classifies `<root>/.env`, then merges `<root>/.env.example`.
///
/// A missing or unreadable `.env` is not an error: the project simply has no
/// environment file. A permission failure is surfaced so the caller can
/// decide what to do with it. `.env.example` contributes service descriptors
/// only, and only for service names the `.env` classification did not
/// already produce; its variable values never reach the generated output.
pub fn analyze_environment(project_root: &Path) -> Result<EnvironmentConfig> {
    let env_path = project_root.join(".env");

    let mut config = match read_env_file(&env_path)? {
        Some(content) => {
            let variables = parse_env_file(&content);
            let services = classify_services(&variables);
            log::debug!(
                "Parsed {} variables and {} services from {}",
                variables.len(),
                services.len(),
                env_path.display()
            );
            EnvironmentConfig {
                variables,
                has_env_file: true,
                services,
            }
        }
        None => EnvironmentConfig::default(),
    };

    let example_path = project_root.join(".env.example");
    if let Ok(content) = std::fs::read_to_string(&example_path) {
        let example_vars = parse_env_file(&content);
        for descriptor in classify_services(&example_vars) {
            if !config.services.iter().any(|s| s.name == descriptor.name) {
                config.services.push(descriptor);
            }
        }
    }

    Ok(config)
}

fn read_env_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(AnalysisError::PermissionDenied {
            path: path.to_path_buf(),
        }
        .into()),
        Err(_) => Ok(None),
    }
}
