use crate::config::OutputFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airq-dashboard")]
#[command(about = "Air-quality dashboard: pollutant, wind and weather charts for a date range")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Configuration file [default: airq.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide the loading spinner")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every chart once for a date range
    Show {
        #[arg(short, long, help = "Dataset file (.csv or .parquet)")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "First day to include (YYYY-MM-DD)")]
        start: Option<NaiveDate>,

        #[arg(short, long, help = "Last day to include (YYYY-MM-DD)")]
        end: Option<NaiveDate>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Read date ranges from stdin and re-render after each one
    Interactive {
        #[arg(short, long, help = "Dataset file (.csv or .parquet)")]
        input: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Summarize the dataset contents
    Info {
        #[arg(short, long, help = "Dataset file (.csv or .parquet)")]
        input: Option<PathBuf>,

        #[arg(short, long, default_value = "5")]
        sample: usize,
    },
}
