//! Command-line interface for wikispan.

use clap::Parser;
use std::path::PathBuf;
use wikispan_config::Config;

/// Wikispan - scan markdown text for wiki-style inline tokens.
///
/// Every input line is scanned as one inline text span and printed as a
/// listing of plain text runs and token nodes.
#[derive(Parser, Debug)]
#[command(
    name = "wikispan",
    author = "Wikispan Contributors",
    version,
    about = "Scan markdown text for wiki-style inline tokens",
    after_help = "Examples:\n  \
                  cat notes.md | wikispan\n  \
                  wikispan --tokens-only notes.md\n  \
                  wikispan --only wiki_link -c extra.toml notes.md\n  \
                  wikispan --list"
)]
pub struct Cli {
    /// Input files to scan (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Do not load builtin definitions (except those named with --only)
    #[arg(long = "no-builtins")]
    pub no_builtins: bool,

    /// Load only these builtin definitions
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,

    /// Print token nodes only, leaving out plain text
    #[arg(short = 't', long = "tokens-only")]
    pub tokens_only: bool,

    /// List registered definitions and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }

    /// Apply builtin selection flags on top of the loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if self.no_builtins {
            config.builtins.include = Some(self.only.clone());
            config.builtins.exclude = Some(vec!["*".to_string()]);
        } else if !self.only.is_empty() {
            config.builtins.include = Some(self.only.clone());
        }
    }
}

/// Show paths information.
pub fn show_paths() {
    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}
