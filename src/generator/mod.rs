//! # Generator Module
//!
//! Turns analysis results into Docker artifacts. Generation is pure text
//! synthesis: facts and settings in, Dockerfile or docker-compose text out.
//! Nothing here touches the filesystem, and identical inputs always produce
//! identical output.

use crate::analyzer::{EnvironmentConfig, ExpressFacts};
use serde::{Deserialize, Serialize};

pub mod compose_gen;
pub mod dockerfile_gen;

pub const DEFAULT_NODE_VERSION: &str = "18-alpine";
pub const DEFAULT_PORT: u16 = 3000;

/// Caller-supplied generation settings.
///
/// `None` fields fall back to the analyzed project facts, then to the fixed
/// defaults above.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Node base image tag, e.g. `18-alpine` or `20-slim`
    pub node_version: Option<String>,
    /// Port the container exposes and the app listens on
    pub port: Option<u16>,
    /// Overrides the analyzer's TypeScript detection
    pub has_typescript: Option<bool>,
    /// Development mode: dev server, debug port, dev dependencies
    pub is_development: bool,
    /// Environment variables and services to wire into the artifacts
    pub environment: Option<EnvironmentConfig>,
}

/// Generate a Dockerfile based on project facts and settings
pub fn generate_dockerfile(facts: &ExpressFacts, config: &GeneratorConfig) -> String {
    dockerfile_gen::generate(facts, config)
}

/// Generate a Docker Compose file based on project facts and settings
pub fn generate_compose(facts: &ExpressFacts, config: &GeneratorConfig) -> String {
    compose_gen::generate(facts, config)
}

/// Settings after precedence resolution, shared by both generators.
pub(crate) struct ResolvedConfig<'a> {
    pub node_version: String,
    pub port: u16,
    pub has_typescript: bool,
    pub is_development: bool,
    pub environment: Option<&'a EnvironmentConfig>,
}

/// Resolution order: explicit setting, then analyzed fact, then default.
pub(crate) fn resolve<'a>(facts: &ExpressFacts, config: &'a GeneratorConfig) -> ResolvedConfig<'a> {
    ResolvedConfig {
        node_version: config
            .node_version
            .clone()
            .unwrap_or_else(|| DEFAULT_NODE_VERSION.to_string()),
        port: config.port.or(facts.port).unwrap_or(DEFAULT_PORT),
        has_typescript: config.has_typescript.unwrap_or(facts.has_typescript),
        is_development: config.is_development,
        environment: config.environment.as_ref(),
    }
}

pub(crate) fn mode_name(is_development: bool) -> &'static str {
    if is_development {
        "development"
    } else {
        "production"
    }
}

/// Replaces the known-bad `:invalid:url:` marker at the emission boundary.
/// Only the first occurrence is rewritten; analysis results keep the raw
/// value.
pub(crate) fn sanitize_value(value: &str) -> String {
    if value.contains(":invalid:") {
        value.replacen(":invalid:url:", "invalid-value", 1)
    } else {
        value.to_string()
    }
}

/// `dev_`/`prod_` prefixed names are only emitted when the prefix matches
/// the active mode. The check is case-insensitive.
pub(crate) fn is_mode_filtered(name: &str, is_development: bool) -> bool {
    let lower = name.to_lowercase();
    let dev_only = lower.starts_with("dev_");
    let prod_only = lower.starts_with("prod_");
    (dev_only && !is_development) || (prod_only && is_development)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolution_precedence() {
        let facts = ExpressFacts {
            port: Some(4000),
            has_typescript: true,
            ..ExpressFacts::default()
        };

        // Explicit settings win
        let config = GeneratorConfig {
            node_version: Some("20-slim".to_string()),
            port: Some(5000),
            has_typescript: Some(false),
            ..GeneratorConfig::default()
        };
        let resolved = resolve(&facts, &config);
        assert_eq!(resolved.node_version, "20-slim");
        assert_eq!(resolved.port, 5000);
        assert!(!resolved.has_typescript);

        // Facts fill the gaps
        let config = GeneratorConfig::default();
        let resolved = resolve(&facts, &config);
        assert_eq!(resolved.node_version, "18-alpine");
        assert_eq!(resolved.port, 4000);
        assert!(resolved.has_typescript);

        // Defaults as the last resort
        let config = GeneratorConfig::default();
        let resolved = resolve(&ExpressFacts::default(), &config);
        assert_eq!(resolved.node_version, "18-alpine");
        assert_eq!(resolved.port, 3000);
        assert!(!resolved.has_typescript);
    }

    #[test]
    fn test_sanitize_value_rewrites_first_marker_only() {
        assert_eq!(sanitize_value(":invalid:url:"), "invalid-value");
        assert_eq!(
            sanitize_value("a=:invalid:url: b=:invalid:url:"),
            "a=invalid-value b=:invalid:url:"
        );
        assert_eq!(sanitize_value("redis://localhost"), "redis://localhost");
        // The short marker alone is left as-is
        assert_eq!(sanitize_value(":invalid:"), ":invalid:");
    }

    #[test]
    fn test_mode_filtering() {
        assert!(is_mode_filtered("DEV_API_KEY", false));
        assert!(!is_mode_filtered("DEV_API_KEY", true));
        assert!(is_mode_filtered("PROD_API_KEY", true));
        assert!(!is_mode_filtered("PROD_API_KEY", false));
        assert!(!is_mode_filtered("API_KEY", true));
        assert!(!is_mode_filtered("API_KEY", false));
    }

    #[test]
    fn test_compose_from_analyzed_project() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("package.json"),
            r#"{"name": "shop-api", "dependencies": {"express": "^4.18.2"}}"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join(".env"),
            "MONGODB_URI=mongodb://localhost:27017/shop\nAPI_KEY=secret\n",
        )
        .unwrap();

        let analysis = crate::analyzer::analyze_project(temp_dir.path()).unwrap();
        let config = GeneratorConfig {
            environment: Some(analysis.environment.clone()),
            ..GeneratorConfig::default()
        };
        let compose = generate_compose(&analysis.express, &config);

        assert!(compose.contains("\n  mongodb:\n"));
        assert!(compose.contains("    image: mongo:latest\n"));
        assert!(compose.contains("      - MONGODB_URI=mongodb://localhost:27017/shop\n"));
        assert!(compose.contains("      - API_KEY=secret\n"));
        assert!(compose.contains("    depends_on:\n      - mongodb\n"));
        assert!(compose.contains("\nvolumes:\n  mongodb_data:\n"));
    }
}
