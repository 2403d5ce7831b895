//! CLI Tooling
//!
//! Command-line interface over the decoder. Every command decodes the given
//! file from scratch and renders one view of the result as text or JSON.

use crate::config::{ConfigLoader, MetatreeConfig};
use crate::error::ApiError;
use crate::store::MetaStore;
use crate::tooling::format::{
    format_attributes_text, format_header_text, format_index_text, format_metadata_text,
    format_tree_text,
};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Metatree CLI - inspect metadata tree containers
#[derive(Parser)]
#[command(name = "metatree")]
#[command(about = "Decode and inspect metadata tree containers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over defaults and the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum tree depth accepted by the decoder
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the decoded file header
    Header {
        /// Container file
        file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the attribute table
    Attributes {
        /// Container file
        file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the directory tree with each node's metadata
    Tree {
        /// Container file
        file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Levels below the root to print (text only)
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Show the flat path → metadata index
    Index {
        /// Container file
        file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show metadata for one path
    Get {
        /// Container file
        file: PathBuf,
        /// Node path as composed by the decoder ("" for the root)
        path: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

impl Cli {
    /// Fold logging flags into the loaded configuration.
    pub fn apply_overrides(&self, config: &mut MetatreeConfig) {
        if let Some(depth) = self.max_depth {
            config.decoder.max_depth = depth;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

/// Output format for a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::ConfigError(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

/// CLI context holding resolved configuration
pub struct CliContext {
    config: MetatreeConfig,
}

impl CliContext {
    /// Create a context from the standard config sources.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Ok(Self { config })
    }

    /// Create a context from an already-resolved configuration.
    pub fn with_config(config: MetatreeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MetatreeConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut MetatreeConfig {
        &mut self.config
    }

    fn open(&self, file: &Path) -> Result<MetaStore, ApiError> {
        let store = MetaStore::open(file, &self.config.decoder)?;
        info!(file = %file.display(), nodes = store.node_count(), "Opened container");
        Ok(store)
    }

    /// Execute a command, returning the rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Header { file, format } => {
                let format = parse_format(format)?;
                let store = self.open(file)?;
                match format {
                    OutputFormat::Text => Ok(format_header_text(&store.header)),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&store.header)?),
                }
            }
            Commands::Attributes { file, format } => {
                let format = parse_format(format)?;
                let store = self.open(file)?;
                match format {
                    OutputFormat::Text => Ok(format_attributes_text(&store.attributes)),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&store.attributes)?),
                }
            }
            Commands::Tree {
                file,
                format,
                depth,
            } => {
                let format = parse_format(format)?;
                let store = self.open(file)?;
                match format {
                    OutputFormat::Text => Ok(format_tree_text(&store.root, *depth)),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&store.root)?),
                }
            }
            Commands::Index { file, format } => {
                let format = parse_format(format)?;
                let store = self.open(file)?;
                match format {
                    OutputFormat::Text => Ok(format_index_text(&store.index)),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&store.index)?),
                }
            }
            Commands::Get { file, path, format } => {
                let format = parse_format(format)?;
                let store = self.open(file)?;
                let node = store
                    .find(path)
                    .ok_or_else(|| ApiError::PathNotFound(path.clone()))?;
                match format {
                    OutputFormat::Text => Ok(format_metadata_text(path, &node.metadata)),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                        "path": path,
                        "last_changed": node.last_changed,
                        "metadata": node.metadata,
                    }))?),
                }
            }
        }
    }
}
