//! # Display Module
//!
//! Renders analysis results for humans. JSON output is handled at the CLI
//! layer; this module covers the simple summary, the detailed variant, and
//! the property table.

use crate::analyzer::{ProjectAnalysis, ServiceDescriptor};
use colored::*;
use prettytable::{format, row, Table};

/// How to render an analysis on the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Short line-oriented summary
    Simple,
    /// Summary plus every variable and service URL
    Detailed,
    /// Property/value table
    Table,
}

pub fn display_analysis(analysis: &ProjectAnalysis, mode: DisplayMode) {
    match mode {
        DisplayMode::Simple => print_summary(analysis, false),
        DisplayMode::Detailed => print_summary(analysis, true),
        DisplayMode::Table => print_table(analysis),
    }
}

fn print_summary(analysis: &ProjectAnalysis, detailed: bool) {
    println!();
    println!("{}", "📊 Express.js Project Analysis".blue().bold());
    println!();
    println!("  Project Type: {}", analysis.project_type.as_str().cyan());
    println!(
        "  Package.json: {}",
        if analysis.has_package_json { "found" } else { "not found" }
    );
    println!("  Express: {}", express_summary(analysis));
    println!(
        "  Main File: {}",
        analysis.express.main_file.as_deref().unwrap_or("-")
    );
    println!("  Port: {}", port_summary(analysis));
    println!(
        "  TypeScript: {}",
        if analysis.express.has_typescript { "Yes" } else { "No" }
    );
    println!("  Middleware: {}", middleware_summary(&analysis.express.middleware));
    println!();
    println!("  Environment File: {}", environment_summary(analysis));

    if detailed && !analysis.environment.variables.is_empty() {
        println!();
        println!("  Environment Variables:");
        for (key, value) in analysis.environment.variables.iter() {
            println!("    {}={}", key, value);
        }
    }

    if !analysis.environment.services.is_empty() {
        println!();
        println!("  Detected Services:");
        if detailed {
            for service in &analysis.environment.services {
                match &service.url {
                    Some(url) => println!(
                        "   - {} ({}): {}",
                        service.name.as_str().green(),
                        requirement(service),
                        url
                    ),
                    None => println!(
                        "   - {} ({})",
                        service.name.as_str().green(),
                        requirement(service)
                    ),
                }
            }
        } else {
            print_service_summary(&analysis.environment.services);
        }
    }
    println!();
}

fn print_table(analysis: &ProjectAnalysis) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["Property", "Value"]);

    table.add_row(row!["Project Type", analysis.project_type.as_str()]);
    table.add_row(row![
        "Package.json",
        if analysis.has_package_json { "found" } else { "not found" }
    ]);
    table.add_row(row!["Express", express_summary(analysis)]);
    table.add_row(row![
        "Main File",
        analysis.express.main_file.as_deref().unwrap_or("-")
    ]);
    table.add_row(row!["Port", port_summary(analysis)]);
    table.add_row(row![
        "TypeScript",
        if analysis.express.has_typescript { "Yes" } else { "No" }
    ]);
    table.add_row(row![
        "Middleware",
        middleware_summary(&analysis.express.middleware)
    ]);
    table.add_row(row!["Environment File", environment_summary(analysis)]);
    table.add_row(row![
        "Services",
        analysis.environment.services.len().to_string()
    ]);

    println!();
    table.printstd();

    if !analysis.environment.services.is_empty() {
        println!();
        println!("  Detected Services:");
        print_service_summary(&analysis.environment.services);
    }
    println!();
}

/// One line per service, shared with the generate command's output
pub fn print_service_summary(services: &[ServiceDescriptor]) {
    for service in services {
        println!(
            "   - {} ({})",
            service.name.as_str().green(),
            requirement(service)
        );
    }
}

fn requirement(service: &ServiceDescriptor) -> &'static str {
    if service.required {
        "Required"
    } else {
        "Optional"
    }
}

fn express_summary(analysis: &ProjectAnalysis) -> String {
    if analysis.express.has_express {
        match &analysis.express.version {
            Some(version) => format!("Yes ({})", version),
            None => "Yes".to_string(),
        }
    } else {
        "No".to_string()
    }
}

fn port_summary(analysis: &ProjectAnalysis) -> String {
    match analysis.express.port {
        Some(port) => port.to_string(),
        None => "Not detected".to_string(),
    }
}

fn middleware_summary(middleware: &[String]) -> String {
    if middleware.is_empty() {
        "None detected".to_string()
    } else {
        middleware.join(", ")
    }
}

fn environment_summary(analysis: &ProjectAnalysis) -> String {
    if analysis.environment.has_env_file {
        format!("found ({} variables)", analysis.environment.variables.len())
    } else {
        "not found".to_string()
    }
}
