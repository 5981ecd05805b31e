use serde::{Deserialize, Serialize};

/// User configuration persisted in `.devenvrc.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisSettings,
    pub generation: GenerationSettings,
    pub output: OutputSettings,
}

/// Settings for the analysis phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Files larger than this many bytes are skipped during fact scanning
    pub max_file_size: usize,
}

/// Defaults for generation; command-line flags override these
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub mode: Option<GenerationMode>,
    pub port: Option<u16>,
    pub node_version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Development,
    Production,
}

impl GenerationMode {
    pub fn is_development(&self) -> bool {
        matches!(self, GenerationMode::Development)
    }
}

/// Settings for analysis output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// Default rendering for analysis results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Simple,
    Json,
    Table,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024, // 1MB
        }
    }
}
