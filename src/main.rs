use clap::Parser;
use devenv_bootstrap::{
    analyzer::{self, AnalysisConfig},
    cli::{Cli, Commands, OutputFormat},
    config::{self, Config},
    error::{ConfigError, GeneratorError},
    generator::{self, GeneratorConfig},
};

use devenv_bootstrap::analyzer::display::{self, display_analysis, DisplayMode};
use devenv_bootstrap::config::types::{GenerationMode, GenerationSettings, OutputFormat as ConfigOutputFormat};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> devenv_bootstrap::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Execute command
    match cli.command {
        Commands::Analyze {
            path,
            json,
            detailed,
            format,
        } => {
            let config = config::load_config(cli.config.as_deref(), &path)?;
            handle_analyze(path, json, detailed, format, &config)
        }
        Commands::Generate {
            path,
            output,
            dockerfile,
            compose,
            all,
            dev,
            port,
            node_version,
            dry_run,
            force,
            save_config,
        } => {
            let config = config::load_config(cli.config.as_deref(), &path)?;
            let options = GenerateOptions {
                output,
                dockerfile,
                compose,
                all,
                dev,
                port,
                node_version,
                dry_run,
                force,
                save_config,
            };
            handle_generate(path, options, config)
        }
    }
}

/// Flags of the generate command, grouped to keep the handler signature short.
struct GenerateOptions {
    output: Option<PathBuf>,
    dockerfile: bool,
    compose: bool,
    all: bool,
    dev: bool,
    port: Option<u16>,
    node_version: Option<String>,
    dry_run: bool,
    force: bool,
    save_config: bool,
}

fn handle_analyze(
    path: PathBuf,
    json: bool,
    detailed: bool,
    format: Option<OutputFormat>,
    config: &Config,
) -> devenv_bootstrap::Result<()> {
    println!("🔍 Analyzing project: {}", path.display());

    let analysis_config = AnalysisConfig {
        max_file_size: config.analysis.max_file_size,
    };
    let analysis = analyzer::analyze_project_with_config(&path, &analysis_config)?;

    // The --json flag wins over --format and the configured default
    let format = if json {
        OutputFormat::Json
    } else {
        format.unwrap_or(match config.output.format {
            ConfigOutputFormat::Simple => OutputFormat::Simple,
            ConfigOutputFormat::Json => OutputFormat::Json,
            ConfigOutputFormat::Table => OutputFormat::Table,
        })
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Table => display_analysis(&analysis, DisplayMode::Table),
        OutputFormat::Simple => {
            let mode = if detailed {
                DisplayMode::Detailed
            } else {
                DisplayMode::Simple
            };
            display_analysis(&analysis, mode);
        }
    }

    Ok(())
}

fn handle_generate(
    path: PathBuf,
    options: GenerateOptions,
    config: Config,
) -> devenv_bootstrap::Result<()> {
    println!("🔍 Analyzing project for generation: {}", path.display());

    let analysis_config = AnalysisConfig {
        max_file_size: config.analysis.max_file_size,
    };
    let analysis = analyzer::analyze_project_with_config(&path, &analysis_config)?;

    let port = options.port.or(config.generation.port);
    if let Some(0) = port {
        return Err(ConfigError::Validation {
            message: "Invalid port number. Must be between 1 and 65535".to_string(),
        }
        .into());
    }

    let is_development = options.dev
        || config
            .generation
            .mode
            .map(|mode| mode.is_development())
            .unwrap_or(false);

    let generator_config = GeneratorConfig {
        node_version: options
            .node_version
            .or_else(|| config.generation.node_version.clone()),
        port,
        has_typescript: None,
        is_development,
        environment: Some(analysis.environment.clone()),
    };

    println!("✅ Analysis complete. Generating Docker configuration...");

    let generate_all = options.all || (!options.dockerfile && !options.compose);
    let output_dir = options
        .output
        .unwrap_or_else(|| analysis.project_root.clone());

    if !options.dry_run {
        fs::create_dir_all(&output_dir)?;
    }

    let mut written = Vec::new();

    if generate_all || options.dockerfile {
        let content = generator::generate_dockerfile(&analysis.express, &generator_config);

        if options.dry_run {
            println!("\n--- Dockerfile (dry run) ---");
            println!("{}", content);
        } else if write_artifact(&output_dir.join("Dockerfile"), &content, options.force)? {
            written.push("Dockerfile");
        }
    }

    if generate_all || options.compose {
        let content = generator::generate_compose(&analysis.express, &generator_config);

        if options.dry_run {
            println!("\n--- docker-compose.yml (dry run) ---");
            println!("{}", content);
        } else if write_artifact(
            &output_dir.join("docker-compose.yml"),
            &content,
            options.force,
        )? {
            written.push("docker-compose.yml");
        }
    }

    if !written.is_empty() {
        println!("\n✅ Generated Docker configuration files:");
        for name in &written {
            println!("   - {}", name);
        }
    }

    let services = &analysis.environment.services;
    if !services.is_empty() {
        println!("\nDetected services:");
        display::print_service_summary(services);
    }

    if options.save_config {
        let mode = if is_development {
            GenerationMode::Development
        } else {
            GenerationMode::Production
        };
        let saved = Config {
            generation: GenerationSettings {
                mode: Some(mode),
                port,
                node_version: generator_config.node_version.clone(),
            },
            ..config
        };
        let saved_path = config::save_config(&saved, &analysis.project_root)?;
        println!("💾 Configuration saved to {}", saved_path.display());
    }

    Ok(())
}

fn write_artifact(path: &Path, content: &str, force: bool) -> devenv_bootstrap::Result<bool> {
    if path.exists() && !force {
        println!(
            "⚠️  {} already exists. Use --force to overwrite.",
            path.display()
        );
        return Ok(false);
    }

    fs::write(path, content).map_err(|e| {
        log::error!("Failed to write {}: {}", path.display(), e);
        GeneratorError::OutputCreation {
            path: path.to_path_buf(),
        }
    })?;

    Ok(true)
}
