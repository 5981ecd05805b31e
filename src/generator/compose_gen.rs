//! Docker Compose generation for Express.js projects
//!
//! The app service always comes first, followed by one block per recognized
//! backing service. Service blocks are deduplicated by compose key, and the
//! app's `depends_on` lists exactly the emitted keys in first-seen order.

use crate::analyzer::{ExpressFacts, ServiceKind};
use crate::generator::{
    is_mode_filtered, mode_name, resolve, sanitize_value, GeneratorConfig, ResolvedConfig,
};

/// Generate docker-compose text for the given facts and settings
pub fn generate(facts: &ExpressFacts, config: &GeneratorConfig) -> String {
    let resolved = resolve(facts, config);
    render(&resolved)
}

fn render(config: &ResolvedConfig) -> String {
    let mode = mode_name(config.is_development);

    let mut fragments = String::new();
    let mut depends_on: Vec<&'static str> = Vec::new();
    let mut named_volumes: Vec<&'static str> = Vec::new();

    if let Some(environment) = config.environment {
        for descriptor in &environment.services {
            if is_mode_filtered(descriptor.name.as_str(), config.is_development) {
                continue;
            }
            let key = descriptor.name.compose_key();
            if depends_on.contains(&key) {
                continue;
            }
            match descriptor.name {
                ServiceKind::MongoDB => {
                    fragments.push_str("\n  mongodb:\n");
                    fragments.push_str("    image: mongo:latest\n");
                    fragments.push_str("    ports:\n");
                    fragments.push_str("      - \"27017:27017\"\n");
                    fragments.push_str("    volumes:\n");
                    fragments.push_str("      - mongodb_data:/data/db\n");
                    named_volumes.push("mongodb_data");
                    depends_on.push(key);
                }
                ServiceKind::Redis => {
                    fragments.push_str("\n  redis:\n");
                    fragments.push_str("    image: redis:alpine\n");
                    fragments.push_str("    ports:\n");
                    fragments.push_str("      - \"6379:6379\"\n");
                    depends_on.push(key);
                }
                ServiceKind::RabbitMQ => {
                    fragments.push_str("\n  rabbitmq:\n");
                    fragments.push_str("    image: rabbitmq:management\n");
                    fragments.push_str("    ports:\n");
                    fragments.push_str("      - \"5672:5672\"\n");
                    fragments.push_str("      - \"15672:15672\"\n");
                    depends_on.push(key);
                }
                // Recognized in analysis but with no compose block yet, so
                // they never reach depends_on either
                ServiceKind::Database | ServiceKind::Elasticsearch | ServiceKind::Kafka => {}
            }
        }
    }

    let mut app = String::new();
    app.push_str("  app:\n");
    app.push_str("    build:\n");
    app.push_str("      context: .\n");
    app.push_str(&format!("      target: {}\n", mode));
    app.push_str("    ports:\n");
    app.push_str(&format!("      - \"{}:{}\"\n", config.port, config.port));
    if config.is_development {
        app.push_str("      - \"9229:9229\" # Debug port\n");
    }
    app.push_str("    environment:\n");
    app.push_str(&format!("      - NODE_ENV={}\n", mode));
    app.push_str(&format!("      - PORT={}\n", config.port));
    if let Some(environment) = config.environment {
        for (key, value) in environment.variables.iter() {
            if is_mode_filtered(key, config.is_development) {
                continue;
            }
            app.push_str(&format!("      - {}={}\n", key, sanitize_value(value)));
        }
    }
    app.push_str("    volumes:\n");
    app.push_str("      - .:/app\n");
    app.push_str("      - /app/node_modules\n");
    app.push_str(&format!(
        "    command: {}\n",
        if config.is_development {
            "npm run dev"
        } else {
            "npm start"
        }
    ));
    if !depends_on.is_empty() {
        app.push_str("    depends_on:\n");
        for key in &depends_on {
            app.push_str(&format!("      - {}\n", key));
        }
    }

    let mut out = String::new();
    out.push_str("version: '3.8'\n");
    out.push('\n');
    out.push_str("services:\n");
    out.push_str(&app);
    out.push_str(&fragments);

    if !named_volumes.is_empty() {
        out.push('\n');
        out.push_str("volumes:\n");
        for name in &named_volumes {
            out.push_str(&format!("  {}:\n", name));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::environment::parse_env_file;
    use crate::analyzer::services::classify_services;
    use crate::analyzer::EnvironmentConfig;

    fn environment_from(env_content: &str) -> EnvironmentConfig {
        let variables = parse_env_file(env_content);
        let services = classify_services(&variables);
        EnvironmentConfig {
            variables,
            has_env_file: true,
            services,
        }
    }

    fn config_with_env(env_content: &str, is_development: bool) -> GeneratorConfig {
        GeneratorConfig {
            is_development,
            environment: Some(environment_from(env_content)),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_base_structure_without_services() {
        let compose = generate(&ExpressFacts::default(), &GeneratorConfig::default());

        assert!(compose.starts_with("version: '3.8'\n"));
        assert!(compose.contains("services:\n  app:\n"));
        assert!(compose.contains("      context: .\n"));
        assert!(compose.contains("      target: production\n"));
        assert!(compose.contains("      - \"3000:3000\"\n"));
        assert!(compose.contains("      - NODE_ENV=production\n"));
        assert!(compose.contains("      - .:/app\n"));
        assert!(compose.contains("      - /app/node_modules\n"));
        assert!(compose.contains("    command: npm start\n"));
        assert!(!compose.contains("depends_on:"));
        assert!(!compose.contains("9229"));
        // No top-level volumes section when no service needs one
        assert!(!compose.contains("\nvolumes:\n"));
    }

    #[test]
    fn test_development_mode() {
        let config = GeneratorConfig {
            is_development: true,
            ..GeneratorConfig::default()
        };
        let compose = generate(&ExpressFacts::default(), &config);

        assert!(compose.contains("      target: development\n"));
        assert!(compose.contains("      - \"9229:9229\" # Debug port\n"));
        assert!(compose.contains("      - NODE_ENV=development\n"));
        assert!(compose.contains("    command: npm run dev\n"));
    }

    #[test]
    fn test_mongodb_service_block() {
        let config = config_with_env("MONGODB_URI=mongodb://localhost:27017/app\n", false);
        let compose = generate(&ExpressFacts::default(), &config);

        assert!(compose.contains("\n  mongodb:\n"));
        assert!(compose.contains("    image: mongo:latest\n"));
        assert!(compose.contains("      - \"27017:27017\"\n"));
        assert!(compose.contains("      - mongodb_data:/data/db\n"));
        assert!(compose.contains("    depends_on:\n      - mongodb\n"));
        assert!(compose.contains("\nvolumes:\n  mongodb_data:\n"));
    }

    #[test]
    fn test_redis_and_rabbitmq_blocks() {
        let config = config_with_env(
            "REDIS_URL=redis://localhost:6379\nRABBITMQ_URL=amqp://localhost:5672\n",
            false,
        );
        let compose = generate(&ExpressFacts::default(), &config);

        assert!(compose.contains("\n  redis:\n"));
        assert!(compose.contains("    image: redis:alpine\n"));
        assert!(compose.contains("\n  rabbitmq:\n"));
        assert!(compose.contains("    image: rabbitmq:management\n"));
        assert!(compose.contains("      - \"15672:15672\"\n"));
        assert!(compose.contains("    depends_on:\n      - redis\n      - rabbitmq\n"));
        // Neither of these services needs a named volume
        assert!(!compose.contains("\nvolumes:\n"));
    }

    #[test]
    fn test_duplicate_services_emit_one_block() {
        let config = config_with_env(
            "MONGODB_PRIMARY_URI=mongodb://primary:27017\nMONGODB_SECONDARY_URI=mongodb://secondary:27017\n",
            false,
        );
        let compose = generate(&ExpressFacts::default(), &config);

        assert_eq!(compose.matches("\n  mongodb:\n").count(), 1);
        assert_eq!(compose.matches("      - mongodb\n").count(), 1);
    }

    #[test]
    fn test_services_without_blocks_are_omitted() {
        let config = config_with_env("DATABASE_URL=postgresql://localhost/app\n", false);
        let compose = generate(&ExpressFacts::default(), &config);

        assert!(!compose.contains("  database:"));
        assert!(!compose.contains("depends_on:"));
    }

    #[test]
    fn test_environment_variables_mirrored_with_sanitization() {
        let config = config_with_env("API_KEY=secret\nREDIS_URL=:invalid:url:\n", false);
        let compose = generate(&ExpressFacts::default(), &config);

        assert!(compose.contains("      - API_KEY=secret\n"));
        assert!(compose.contains("      - REDIS_URL=invalid-value\n"));
        assert!(!compose.contains(":invalid:url:"));
        // The descriptor still produces the redis block
        assert!(compose.contains("\n  redis:\n"));
    }

    #[test]
    fn test_mode_prefixed_variables_are_filtered() {
        let env = "DEV_DEBUG=1\nPROD_CACHE_TTL=60\nSHARED=yes\n";

        let compose = generate(&ExpressFacts::default(), &config_with_env(env, true));
        assert!(compose.contains("      - DEV_DEBUG=1\n"));
        assert!(!compose.contains("PROD_CACHE_TTL"));
        assert!(compose.contains("      - SHARED=yes\n"));

        let compose = generate(&ExpressFacts::default(), &config_with_env(env, false));
        assert!(!compose.contains("DEV_DEBUG"));
        assert!(compose.contains("      - PROD_CACHE_TTL=60\n"));
        assert!(compose.contains("      - SHARED=yes\n"));
    }

    #[test]
    fn test_output_is_valid_yaml() {
        let config = config_with_env(
            "MONGODB_URI=mongodb://localhost:27017/app\n\
             REDIS_URL=redis://localhost:6379\n\
             API_KEY=secret\n",
            true,
        );
        let compose = generate(&ExpressFacts::default(), &config);

        let parsed: serde_yaml::Value = serde_yaml::from_str(&compose).unwrap();
        let services = parsed.get("services").unwrap();
        assert!(services.get("app").is_some());
        assert!(services.get("mongodb").is_some());
        assert!(services.get("redis").is_some());

        let depends = services.get("app").unwrap().get("depends_on").unwrap();
        let keys: Vec<&str> = depends
            .as_sequence()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["mongodb", "redis"]);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let facts = ExpressFacts {
            port: Some(8080),
            ..ExpressFacts::default()
        };
        let config = config_with_env("MONGODB_URI=mongodb://localhost:27017\nREDIS_URL=x\n", true);

        assert_eq!(generate(&facts, &config), generate(&facts, &config));
    }
}
