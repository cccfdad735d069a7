//! Configuration management for the karyotype checker.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional TOML configuration file
//! - Building the effective rule catalog

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::validation::RuleCatalog;

/// Command-line arguments for the karyotype checker
#[derive(Debug, Parser)]
#[command(name = "karyotype-check")]
#[command(about = "Validate ISCN karyotype strings")]
#[command(version)]
pub struct Args {
    /// Karyotypes to validate; one per line on stdin when omitted
    #[arg(value_name = "KARYOTYPE")]
    pub karyotypes: Vec<String>,

    /// Configuration file to use instead of the default location
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Rules to switch off, in addition to those disabled in the file
    #[arg(long = "disable-rule", value_name = "ID", help = "Disable a rule by id (repeatable)")]
    pub disable_rules: Vec<String>,

    #[arg(long, help = "Print single-line JSON")]
    pub compact: bool,

    #[arg(long, help = "List the active rules and exit")]
    pub list_rules: bool,

    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Contents of `config.toml`
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub rules: RulesSection,
    pub output: OutputSection,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesSection {
    /// Rule ids removed from the catalog
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub pretty: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl FileConfig {
    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config TOML: {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Karyotypes given on the command line
    pub karyotypes: Vec<String>,
    /// Rule ids to remove, file entries first
    pub disabled_rules: Vec<String>,
    pub pretty: bool,
    pub list_rules: bool,
    pub log_level: String,
    /// File the settings were read from, if any
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    ///
    /// An explicit `--config` file must exist; the default file is optional.
    pub fn from_args(args: Args) -> Result<Self> {
        let (file, config_path) = match args.config {
            Some(path) => (FileConfig::load(&path)?, Some(path)),
            None => match default_config_path().filter(|path| path.is_file()) {
                Some(path) => (FileConfig::load(&path)?, Some(path)),
                None => (FileConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            log::debug!("using config file {}", path.display());
        }

        let mut disabled_rules = file.rules.disabled;
        for id in args.disable_rules {
            if !disabled_rules.contains(&id) {
                disabled_rules.push(id);
            }
        }

        Ok(Config {
            karyotypes: args.karyotypes,
            disabled_rules,
            pretty: file.output.pretty && !args.compact,
            list_rules: args.list_rules,
            log_level: args.log_level,
            config_path,
        })
    }

    /// Standard catalog minus the disabled rules
    pub fn catalog(&self) -> Result<RuleCatalog> {
        RuleCatalog::standard()
            .without(&self.disabled_rules)
            .context("Invalid rule configuration")
    }
}

/// `<config dir>/karyotype-check/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("karyotype-check").join("config.toml"))
}
