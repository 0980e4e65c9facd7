use crate::error::Result;
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_BAR_WIDTH, DEFAULT_CONFIG_FILE, DEFAULT_DATASET_PATH,
    DEFAULT_PRECISION,
};
use crate::writers::RenderOptions;
use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Settings resolved from defaults, an optional TOML file and `AIRQ_*` variables
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,

    pub output_format: OutputFormat,

    #[validate(range(min = 10, max = 200))]
    pub bar_width: usize,

    #[validate(range(max = 6))]
    pub precision: usize,

    pub use_mmap: bool,
}

impl DashboardConfig {
    /// Load configuration; an explicit file must exist, the default one may not
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings = Config::builder()
            .set_default("dataset_path", DEFAULT_DATASET_PATH)?
            .set_default("output_format", "text")?
            .set_default("bar_width", DEFAULT_BAR_WIDTH as i64)?
            .set_default("precision", DEFAULT_PRECISION as i64)?
            .set_default("use_mmap", false)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            bar_width: self.bar_width,
            precision: self.precision,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            output_format: OutputFormat::Text,
            bar_width: DEFAULT_BAR_WIDTH,
            precision: DEFAULT_PRECISION,
            use_mmap: false,
        }
    }
}
