use clap::Parser;
use std::path::PathBuf;

use crate::app::config::{Config, SourceKind};

#[derive(Parser, Debug, Clone)]
#[command(name = "reviewfeed")]
#[command(version)]
#[command(about = "A TUI review feed with infinite scroll and avatars", long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Review endpoint to page from (overrides config)
    #[arg(short, long, conflicts_with = "file")]
    pub endpoint: Option<String>,

    /// Read reviews from a local JSON file instead of the network
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Reviews requested per page (overrides config)
    #[arg(short = 'n', long, value_parser = parse_page_size)]
    pub page_size: Option<usize>,

    /// Write a default config file to the given path (or directory) and exit
    #[arg(long, value_name = "PATH")]
    pub generate_config: Option<PathBuf>,
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid page size '{s}': expected a positive number")),
    }
}

impl Args {
    /// Apply command line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.source.kind = SourceKind::Http;
            config.source.endpoint = endpoint.clone();
        }
        if let Some(file) = &self.file {
            config.source.kind = SourceKind::File;
            config.source.file = Some(file.display().to_string());
        }
        if let Some(page_size) = self.page_size {
            config.source.page_size = page_size;
        }
    }
}
