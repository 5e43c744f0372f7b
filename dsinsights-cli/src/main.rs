//! dsinsights: command-line access to synthetic dataset statistics.
//!
//! Loads the rendered object info of a Unity Perception dataset and prints
//! statistics, renders the overview page as JSON, or runs estimators.
#![allow(clippy::uninlined_format_args, clippy::too_many_lines)]

mod estimators;

use clap::{Parser, Subcommand, ValueEnum};

use dsinsights_charts::overview::{OBJECT_COUNT_FILTER, PIXELS_VISIBLE_FILTER, VALUE};
use dsinsights_charts::{OverviewConfig, OverviewSession};
use dsinsights_core::{CaptureSource, EstimatorConfig, RenderedObjectInfo, SystemConfig};
use dsinsights_io::{MetricsSource, TableWriter};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: {0}")]
    DatasetIo(#[from] dsinsights_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] dsinsights_core::Error),

    #[error("Chart error: {0}")]
    Charts(#[from] dsinsights_charts::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} has no callback")]
    NoCallback(String),
}

/// Which label dropdown to drive.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Filter {
    /// Object counts per capture
    ObjectCount,
    /// Visible pixels per object
    PixelsVisible,
}

impl Filter {
    fn element_id(self) -> &'static str {
        match self {
            Filter::ObjectCount => OBJECT_COUNT_FILTER,
            Filter::PixelsVisible => PIXELS_VISIBLE_FILTER,
        }
    }
}

/// Output format for `stats`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatsFormat {
    Text,
    Csv,
}

/// Statistics and visualization for synthetic computer-vision datasets.
#[derive(Parser)]
#[command(name = "dsinsights")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// System configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Dataset selection shared by the dataset commands.
#[derive(clap::Args)]
struct DatasetArgs {
    /// Dataset root (defaults to `data_root` of the system configuration)
    #[arg(short, long)]
    data_root: Option<PathBuf>,

    /// Metric definition id of the rendered object info
    #[arg(long)]
    definition_id: Option<String>,
}

/// Histogram sampling options.
#[derive(clap::Args)]
struct SamplingArgs {
    /// Maximum rows per histogram (0 disables sampling)
    #[arg(long, default_value_t = dsinsights_charts::MAX_SAMPLES)]
    max_samples: usize,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the overview page as JSON with Plotly figures
    Overview {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        sampling: SamplingArgs,

        /// Label selected in the object count dropdown
        #[arg(long)]
        object_count_label: Option<String>,

        /// Label selected in the visible pixels dropdown
        #[arg(long)]
        pixels_visible_label: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print object counts of a dataset
    Stats {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: StatsFormat,
    },

    /// Select a label in an overview dropdown and print the resulting histogram
    Select {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        sampling: SamplingArgs,

        /// Dropdown to change
        #[arg(short, long, value_enum)]
        filter: Filter,

        /// Label to select
        label: String,
    },

    /// List registered estimators
    Estimators,

    /// Train and evaluate an estimator on the configured dataset
    Evaluate {
        /// Estimator name
        name: String,

        #[command(flatten)]
        dataset: DatasetArgs,

        /// Estimator parameter as KEY=VALUE (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Also write Kubeflow pipeline metrics to FILE
        /// (metricsdir/metricsfilename when FILE is omitted)
        #[arg(long, value_name = "FILE", num_args = 0..=1)]
        write_metrics: Option<Option<PathBuf>>,
    },
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

fn load_system_config(path: Option<&PathBuf>, verbose: bool) -> Result<SystemConfig> {
    let config = match path {
        Some(path) => SystemConfig::from_json_file(path)?,
        None => SystemConfig::new(),
    };
    let verbose = config.verbose || verbose;
    Ok(config.with_verbose(verbose))
}

fn metrics_source(system: &SystemConfig, dataset: &DatasetArgs) -> MetricsSource {
    let data_root = dataset
        .data_root
        .clone()
        .unwrap_or_else(|| PathBuf::from(&system.data_root));
    match &dataset.definition_id {
        Some(id) => MetricsSource::new(data_root, id.as_str()),
        None => MetricsSource::rendered_object_info(data_root),
    }
}

fn overview_config(source: &MetricsSource, sampling: &SamplingArgs) -> OverviewConfig {
    OverviewConfig::default()
        .with_definition_id(source.definition_id())
        .with_max_samples((sampling.max_samples > 0).then_some(sampling.max_samples))
        .with_seed(sampling.seed)
}

fn write_output(output: Option<&PathBuf>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text)?;
        }
    }
    Ok(())
}

/// Writes the per-label totals, a blank line, then the per-capture counts.
fn write_stats_csv<W: Write>(info: &RenderedObjectInfo, out: W) -> Result<W> {
    let mut writer = TableWriter::new(out);
    writer.write_total_counts_csv(&info.total_counts())?;
    let mut out = writer.into_inner();
    writeln!(out)?;
    let mut writer = TableWriter::new(out);
    writer.write_capture_counts_csv(&info.per_capture_counts())?;
    Ok(writer.into_inner())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let system = load_system_config(cli.config.as_ref(), cli.verbose)?;

    match cli.command {
        Commands::Overview {
            dataset,
            sampling,
            object_count_label,
            pixels_visible_label,
            output,
        } => {
            let source = metrics_source(&system, &dataset);
            let config = overview_config(&source, &sampling);

            let start = Instant::now();
            let mut session = OverviewSession::init(source, config)?;
            for (filter, label) in [
                (OBJECT_COUNT_FILTER, object_count_label),
                (PIXELS_VISIBLE_FILTER, pixels_visible_label),
            ] {
                if let Some(label) = label {
                    session
                        .dispatch(filter, VALUE, &label)
                        .ok_or_else(|| CliError::NoCallback(filter.to_string()))?;
                }
            }
            log::info!("rendered overview in {:.2?}", start.elapsed());

            let text = serde_json::to_string_pretty(&session.layout().to_json())?;
            write_output(output.as_ref(), &text)?;
            session.teardown();
        }

        Commands::Stats { dataset, format } => {
            let source = metrics_source(&system, &dataset);
            let info = RenderedObjectInfo::new(source.load()?);
            match format {
                StatsFormat::Csv => {
                    write_stats_csv(&info, io::stdout().lock())?;
                }
                StatsFormat::Text => {
                    let totals = info.total_counts();
                    println!("Dataset: {}", source.describe());
                    println!("  Objects:  {}", info.num_objects());
                    println!("  Captures: {}", info.num_captures());
                    println!();
                    println!("{:>8}  {:<24} {:>10}", "label_id", "label_name", "count");
                    for total in &totals {
                        println!(
                            "{:>8}  {:<24} {:>10}",
                            total.label_id, total.label_name, total.count
                        );
                    }

                    let per_capture = info.per_capture_counts();
                    if let (Some(min), Some(max)) = (
                        per_capture.iter().map(|c| c.count).min(),
                        per_capture.iter().map(|c| c.count).max(),
                    ) {
                        let sum: usize = per_capture.iter().map(|c| c.count).sum();
                        #[allow(clippy::cast_precision_loss)]
                        let mean = sum as f64 / per_capture.len() as f64;
                        println!();
                        println!(
                            "Objects per capture: min {}, max {}, mean {:.2}",
                            min, max, mean
                        );
                    }
                }
            }
        }

        Commands::Select {
            dataset,
            sampling,
            filter,
            label,
        } => {
            let source = metrics_source(&system, &dataset);
            let config = overview_config(&source, &sampling);
            let mut session = OverviewSession::init(source, config)?;

            let element_id = filter.element_id();
            let update = session
                .dispatch(element_id, VALUE, &label)
                .ok_or_else(|| CliError::NoCallback(element_id.to_string()))?;
            let figure = &update.figure;

            println!("{}", figure.title);
            println!("x: {}  y: {}", figure.x_title, figure.y_title);
            match figure.as_histogram() {
                Some(hist) if !hist.bins.is_empty() => {
                    if hist.is_sampled() {
                        println!("(sampled {} of {} rows)", hist.values.len(), hist.total_rows);
                    }
                    for bin in &hist.bins {
                        println!("[{:>10.1}, {:>10.1})  {}", bin.start, bin.end, bin.count);
                    }
                }
                _ => println!("(no data for {:?})", label),
            }
        }

        Commands::Estimators => {
            let registry = estimators::registry()?;
            for name in registry.names() {
                println!("{}", name);
            }
        }

        Commands::Evaluate {
            name,
            dataset,
            params,
            write_metrics,
        } => {
            let mut system = system;
            if let Some(root) = &dataset.data_root {
                system.data_root = root.to_string_lossy().into_owned();
            }
            system.validate()?;

            let mut config = EstimatorConfig::new().with_system(system.clone());
            if let Some(id) = &dataset.definition_id {
                config = config.with_param("definition_id", id.as_str());
            }
            for (key, value) in params {
                config = config.with_param(key, value);
            }

            let registry = estimators::registry()?;
            let mut estimator = registry.create(&name, &config)?;
            if system.dryrun {
                println!("{} ready (dry run)", estimator.name());
                return Ok(());
            }

            estimator.train(&system)?;
            let metrics = estimator.evaluate(&system)?;
            for (metric, value) in &metrics {
                println!("{:<28} {:.4}", metric, value);
            }

            if let Some(target) = write_metrics {
                let path = target.unwrap_or_else(|| system.metrics_path());
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let text = serde_json::to_string_pretty(&estimators::kfp_metrics(&metrics))?;
                fs::write(&path, text)?;
                log::info!("wrote pipeline metrics to {}", path.display());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_select() {
        let cli = Cli::try_parse_from([
            "dsinsights",
            "select",
            "--data-root",
            "/tmp/ds",
            "--filter",
            "pixels-visible",
            "--seed",
            "3",
            "cube",
        ])
        .unwrap();
        match cli.command {
            Commands::Select {
                dataset,
                sampling,
                filter,
                label,
            } => {
                assert_eq!(dataset.data_root, Some(PathBuf::from("/tmp/ds")));
                assert_eq!(sampling.max_samples, dsinsights_charts::MAX_SAMPLES);
                assert_eq!(sampling.seed, Some(3));
                assert_eq!(filter.element_id(), PIXELS_VISIBLE_FILTER);
                assert_eq!(label, "cube");
            }
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::try_parse_from([
            "dsinsights",
            "evaluate",
            "object_count_baseline",
            "-p",
            "definition_id=abc",
            "--write-metrics",
            "/tmp/metrics.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Evaluate {
                name,
                params,
                write_metrics,
                ..
            } => {
                assert_eq!(name, "object_count_baseline");
                assert_eq!(params, vec![("definition_id".to_string(), "abc".to_string())]);
                assert_eq!(write_metrics, Some(Some(PathBuf::from("/tmp/metrics.json"))));
                assert!(estimators::registry().unwrap().contains(&name));
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn test_parse_evaluate_default_metrics_path() {
        let cli =
            Cli::try_parse_from(["dsinsights", "evaluate", "object_count_baseline", "--write-metrics"])
                .unwrap();
        match cli.command {
            Commands::Evaluate { write_metrics, .. } => assert_eq!(write_metrics, Some(None)),
            _ => panic!("expected evaluate"),
        }

        let cli = Cli::try_parse_from(["dsinsights", "evaluate", "object_count_baseline"]).unwrap();
        match cli.command {
            Commands::Evaluate { write_metrics, .. } => assert_eq!(write_metrics, None),
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn test_stats_csv_has_totals_and_capture_counts() {
        let mut table = dsinsights_core::ObjectTable::default();
        table.push("c1", 1, "cube", 0, 10);
        table.push("c1", 2, "sphere", 1, 20);
        table.push("c2", 1, "cube", 2, 30);
        let info = RenderedObjectInfo::new(table);

        let out = write_stats_csv(&info, Vec::new()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "label_id,label_name,count\n1,cube,2\n2,sphere,1\n\ncapture_id,count\nc1,2\nc2,1\n"
        );
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("score=0.5"),
            Ok(("score".to_string(), "0.5".to_string()))
        );
        assert!(parse_key_value("score").is_err());
    }

    #[test]
    fn test_metrics_source_defaults_to_system_root() {
        let system = SystemConfig::new().with_data_root("/mnt/synth");
        let dataset = DatasetArgs {
            data_root: None,
            definition_id: None,
        };
        let source = metrics_source(&system, &dataset);
        assert_eq!(source.data_root(), std::path::Path::new("/mnt/synth"));
        assert_eq!(
            source.definition_id(),
            dsinsights_core::stats::RENDERED_OBJECT_INFO_DEFINITION_ID
        );
    }

    #[test]
    fn test_zero_max_samples_disables_sampling() {
        let source = MetricsSource::rendered_object_info("/tmp");
        let config = overview_config(
            &source,
            &SamplingArgs {
                max_samples: 0,
                seed: None,
            },
        );
        assert_eq!(config.max_samples, None);
    }
}
