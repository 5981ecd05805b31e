//! Dockerfile generation for Express.js projects

use crate::analyzer::ExpressFacts;
use crate::generator::{mode_name, resolve, sanitize_value, GeneratorConfig, ResolvedConfig};

/// Generate Dockerfile text for the given facts and settings
pub fn generate(facts: &ExpressFacts, config: &GeneratorConfig) -> String {
    let resolved = resolve(facts, config);
    render(&resolved)
}

fn render(config: &ResolvedConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("FROM node:{}\n", config.node_version));
    out.push_str("WORKDIR /app\n");
    out.push('\n');

    out.push_str("# Install dependencies\n");
    out.push_str("COPY package*.json ./\n");
    if config.is_development {
        out.push_str("RUN npm install\n");
    } else {
        out.push_str("RUN npm ci\n");
    }
    if config.has_typescript {
        out.push_str("COPY tsconfig.json ./\n");
    }
    out.push('\n');

    out.push_str("# Copy source code\n");
    out.push_str("COPY . .\n");
    if config.has_typescript {
        out.push('\n');
        out.push_str("# Build TypeScript\n");
        out.push_str("RUN npm run build\n");
    }
    out.push('\n');

    out.push_str("# Environment setup\n");
    out.push_str(&format!("ENV NODE_ENV={}\n", mode_name(config.is_development)));
    out.push_str(&format!("ENV PORT={}\n", config.port));
    if let Some(environment) = config.environment {
        for (key, value) in environment.variables.iter() {
            out.push_str(&format!("ENV {}={}\n", key, sanitize_value(value)));
        }
    }
    out.push('\n');

    if config.is_development {
        out.push_str("# For development dependencies\n");
        out.push_str("RUN npm install --only=development\n");
        out.push('\n');
    } else {
        out.push_str("# Security (for production)\n");
        out.push_str("USER node\n");
        out.push('\n');
    }

    out.push_str(&format!("EXPOSE {}\n", config.port));
    if config.is_development {
        out.push_str("CMD [\"npm\", \"run\", \"dev\"]\n");
    } else {
        out.push_str("CMD [\"npm\", \"start\"]\n");
    }

    out
}
