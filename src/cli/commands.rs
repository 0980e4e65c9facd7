use crate::analyzers::DatasetAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::cli::session::{render_cycle, run_session};
use crate::config::{DashboardConfig, OutputFormat};
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::models::{DateRange, ObservationTable};
use crate::readers::DatasetLoader;
use crate::utils::progress::ProgressReporter;
use crate::writers::{ChartRenderer, JsonChartWriter, RenderOptions, TextChartWriter};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, Level};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = DashboardConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Show {
            input,
            start,
            end,
            format,
        } => {
            let format = format.unwrap_or(config.output_format);
            let table = load_dataset(&config, input, spinner_silent(cli.quiet, format))?;

            let dashboard = Dashboard::new(table);
            let view = dashboard.refresh(DateRange::new(start, end));

            let stdout = io::stdout();
            let mut renderer = make_renderer(format, stdout.lock(), config.render_options());
            view.render(renderer.as_mut())?;
        }

        Commands::Interactive { input, format } => {
            let format = format.unwrap_or(config.output_format);
            let table = load_dataset(&config, input, spinner_silent(cli.quiet, format))?;

            let dashboard = Dashboard::new(table);
            let mut renderer = make_renderer(format, io::stdout(), config.render_options());
            let mut prompt = io::stderr();

            // full range first, as the date control starts at the dataset bounds
            render_cycle(
                &dashboard.refresh(DateRange::default()),
                renderer.as_mut(),
                &mut prompt,
            )?;

            let stdin = io::stdin();
            let cycles = run_session(&dashboard, stdin.lock(), &mut prompt, renderer.as_mut())?;
            info!(cycles, "interactive session ended");
        }

        Commands::Info { input, sample } => {
            let table = load_dataset(&config, input, cli.quiet)?;
            let stats = DatasetAnalyzer::new().analyze(&table);

            let mut out = io::stdout().lock();
            writeln!(out, "{}", stats.detailed_summary())?;

            if sample > 0 {
                writeln!(out, "\nSample Records (showing {} records):", sample)?;
                for (i, record) in table.rows().iter().take(sample).enumerate() {
                    writeln!(
                        out,
                        "{}. {} at {}: O3={:?}, SO2={:?}, PM2.5={:?}, PM10={:?}, WSPM={:?}, TEMP={:?} ({})",
                        i + 1,
                        record.station,
                        record.date,
                        record.o3,
                        record.so2,
                        record.pm25,
                        record.pm10,
                        record.wspm,
                        record.temp,
                        record.temp_bin.as_deref().unwrap_or("no bin")
                    )?;
                }
            }
        }
    }

    Ok(())
}

/// Spinner is hidden with `--quiet` and for JSON output
fn spinner_silent(quiet: bool, format: OutputFormat) -> bool {
    quiet || format == OutputFormat::Json
}

/// Install the fmt subscriber: WARN by default, DEBUG when verbose
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);

    // ignore the error when a subscriber is already installed
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = builder.with_writer(io::stderr).try_init();
        }
    }

    Ok(())
}

fn load_dataset(
    config: &DashboardConfig,
    input: Option<PathBuf>,
    silent: bool,
) -> Result<ObservationTable> {
    let path = input.unwrap_or_else(|| config.dataset_path.clone());

    let progress = ProgressReporter::new_spinner(&format!("Loading {}...", path.display()), silent);
    let table = DatasetLoader::new()
        .with_mmap(config.use_mmap)
        .load(&path)?;
    progress.finish_with_message(&format!(
        "Loaded {} observations from {} stations",
        table.len(),
        table.stations().len()
    ));

    Ok(table)
}

fn make_renderer<'a, W: Write + 'a>(
    format: OutputFormat,
    out: W,
    options: RenderOptions,
) -> Box<dyn ChartRenderer + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextChartWriter::new(out).with_options(options)),
        OutputFormat::Json => Box::new(JsonChartWriter::new(out)),
    }
}
