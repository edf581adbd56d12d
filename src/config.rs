use clap::Parser;
use config::{
    Config as ConfigCrate, // Need this for builder
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::layout::{LayoutEngine, DEFAULT_TAB_WIDTH};
use crate::model::{Align, WrapMode};

// Using constants for default values makes them easy to change.
const DEFAULT_WIDTH: usize = 80;
const DEFAULT_WRAP: WrapMode = WrapMode::Space;
const DEFAULT_ALIGN: Align = Align::Left;
const DEFAULT_SHOW_SEGMENTS: bool = false;

const ENV_PREFIX: &str = "CODE_LAYOUT";
const APP_NAME: &str = "code-layout";

// Define potential errors during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Serde struct for deserializing config file values.
// Optional fields allow for layered config (defaults -> file -> env -> args).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileConfig {
    width: Option<usize>,
    tab_width: Option<usize>,
    wrap: Option<WrapMode>,
    align: Option<Align>,
    show_segments: Option<bool>,
}

// Final Config struct, combining all sources.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub filename: Option<PathBuf>, // From command line argument
    pub width: usize,
    pub tab_width: usize,
    pub wrap: WrapMode,
    pub align: Align,
    pub show_segments: bool,
    pub debug_config: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            filename: None,
            width: DEFAULT_WIDTH,
            tab_width: DEFAULT_TAB_WIDTH,
            wrap: DEFAULT_WRAP,
            align: DEFAULT_ALIGN,
            show_segments: DEFAULT_SHOW_SEGMENTS,
            debug_config: false,
        }
    }
}

impl Config {
    pub fn engine(&self) -> LayoutEngine {
        LayoutEngine::new(self.tab_width)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ValidationError(
                "width must be at least 1".to_string(),
            ));
        }
        if self.tab_width == 0 {
            return Err(ConfigError::ValidationError(
                "tab_width must be at least 1".to_string(),
            ));
        }
        if !self.engine().supports_align_mode(self.align) {
            return Err(ConfigError::ValidationError(format!(
                "align mode '{}' is not supported",
                self.align
            )));
        }
        Ok(())
    }
}

// Command line arguments defined using clap.
#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out text into fixed-width display rows", long_about = None)]
pub struct Args {
    /// File to lay out, stdin when omitted
    filename: Option<PathBuf>,

    /// Path to a custom configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of display columns
    #[arg(long, short)]
    width: Option<usize>,
    #[arg(long)]
    tab_width: Option<usize>,
    /// clip, any or space
    #[arg(long)]
    wrap: Option<WrapMode>,
    #[arg(long)]
    align: Option<Align>,

    /// Print the segments of each row instead of the rendered text
    #[arg(long)]
    segments: bool,

    /// Print the merged configuration and exit
    #[arg(long)]
    debug_config: bool,
}

// Function to load configuration from all sources.
pub fn load_config() -> Result<Config, ConfigError> {
    let args = Args::parse();

    let env_source = Environment::with_prefix(ENV_PREFIX).separator("__");
    // Missing variables are fine, an unreadable environment just adds nothing.
    let env_map: Map<String, Value> = env_source.collect().unwrap_or_else(|_| Map::new());

    build_config_from_args(args, Some(env_map))
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
}

// Separate function to allow testing with specific args and override sources
fn build_config_from_args(
    args: Args,
    override_source: Option<Map<String, Value>>,
) -> Result<Config, ConfigError> {
    let config_file_path = args.config.clone().or_else(default_config_path);

    let mut config_builder = ConfigCrate::builder();

    // Layer on config file if path is determined and file exists
    if let Some(ref path) = config_file_path {
        config_builder = config_builder.add_source(File::from(path.clone()).required(false));
    }

    // Overrides (environment or a test map) beat the file.
    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            config_builder = config_builder.set_override(&key, value)?;
        }
    }

    let loaded_sources: FileConfig = config_builder.build()?.try_deserialize()?;

    // args > overrides > file > defaults
    let config = Config {
        filename: args.filename, // Only comes from args
        width: args
            .width
            .or(loaded_sources.width)
            .unwrap_or(DEFAULT_WIDTH),
        tab_width: args
            .tab_width
            .or(loaded_sources.tab_width)
            .unwrap_or(DEFAULT_TAB_WIDTH),
        wrap: args.wrap.or(loaded_sources.wrap).unwrap_or(DEFAULT_WRAP),
        align: args.align.or(loaded_sources.align).unwrap_or(DEFAULT_ALIGN),
        show_segments: args
            .segments
            .then_some(true)
            .or(loaded_sources.show_segments)
            .unwrap_or(DEFAULT_SHOW_SEGMENTS),
        debug_config: args.debug_config,
    };

    config.validate()?;
    Ok(config)
}
