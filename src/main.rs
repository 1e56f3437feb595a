use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rx_outlook::catalog::{self, ScoredMolecule};
use rx_outlook::config::{self, Config};
use rx_outlook::output;
use rx_outlook::scoring::TherapeuticArea;
use rx_outlook::timeline::{self, FilingStrategy, ReviewType, SelectedCountry, Selection};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NOT_FOUND: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a catalog and list molecules by overall score
    Score {
        /// Catalog file (.yaml, .yml or .json)
        catalog: PathBuf,
        /// Only show molecules in this therapeutic area
        #[arg(long)]
        area: Option<String>,
        /// Hide failed or discontinued programmes
        #[arg(long)]
        exclude_failed: bool,
        /// Show at most this many molecules
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show scores, factors and market projection for one molecule
    Show {
        catalog: PathBuf,
        /// Molecule id (case-insensitive)
        id: String,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Write the scored catalog with overallScore and marketData attached
    Export {
        catalog: PathBuf,
        /// Output file (.yaml, .yml or .json)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Generate a reproducible synthetic catalog
    Generate {
        /// Number of molecules
        #[arg(short = 'n', long, default_value_t = 50)]
        count: usize,
        /// RNG seed; the same seed always produces the same catalog
        #[arg(short, long)]
        seed: u64,
        /// Output file (.yaml, .yml or .json)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Plan a regulatory filing timeline across jurisdictions
    Timeline {
        /// Jurisdictions as CODE or CODE:review, e.g. US EU:priority CN
        #[arg(required = true)]
        countries: Vec<String>,
        /// Filing strategy for independent jurisdictions (parallel or sequential)
        #[arg(short, long)]
        strategy: Option<FilingStrategy>,
        /// Project calendar dates from this filing date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List the jurisdictions the timeline planner knows about
    Jurisdictions,
    /// Write a config file with the built-in defaults
    Init {
        /// Overwrite an existing config without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "rx-outlook")]
#[command(about = "Pharma pipeline scoring and regulatory timeline CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/rx-outlook/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_path = cli.config.map(PathBuf::from);

    let command = match cli.command {
        // Init must work even when the existing config is broken
        Commands::Init { force } => std::process::exit(init(config_path, force)),
        command => command,
    };

    let config = match config::load_config(config_path.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let code = match run(command, &config, config_path) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}

fn init(path: Option<PathBuf>, force: bool) -> i32 {
    match config::run_init(path, force) {
        Ok(Some(path)) => {
            println!("Config written to {}", path.display());
            EXIT_SUCCESS
        }
        Ok(None) => {
            println!("Aborted.");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            EXIT_CONFIG
        }
    }
}

fn run(command: Commands, config: &Config, config_path: Option<PathBuf>) -> Result<i32> {
    let scoring = config.effective_scoring();
    let use_colors = output::should_use_colors();

    match command {
        Commands::Score {
            catalog: path,
            area,
            exclude_failed,
            limit,
            format,
        } => {
            let records = catalog::load_catalog(&path)?;
            let mut scored = catalog::assemble_catalog(records, &scoring);

            if let Some(ref area) = area {
                let parsed = TherapeuticArea::parse(area);
                if parsed == TherapeuticArea::Other && !area.trim().eq_ignore_ascii_case("other") {
                    eprintln!("Unknown therapeutic area '{}'. Known areas:", area);
                    for known in TherapeuticArea::ALL {
                        eprintln!("  {}", known);
                    }
                    return Ok(EXIT_NOT_FOUND);
                }
                scored = catalog::filter_by_area(scored, parsed);
            }
            if exclude_failed {
                scored = catalog::exclude_failed(scored);
            }
            if let Some(limit) = limit {
                scored.truncate(limit);
            }

            match format {
                OutputFormat::Table => println!("{}", output::format_scored_table(&scored, use_colors)),
                OutputFormat::Tsv => {
                    let tsv = output::format_tsv(&scored);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                OutputFormat::Json => print_json(&scored)?,
            }
        }
        Commands::Show {
            catalog: path,
            id,
            format,
        } => {
            let records = catalog::load_catalog(&path)?;
            let scored = catalog::assemble_catalog(records, &scoring);
            let Some(molecule) = catalog::find_molecule(&scored, &id) else {
                eprintln!("No molecule with id '{}' in {}", id, path.display());
                return Ok(EXIT_NOT_FOUND);
            };
            match format {
                OutputFormat::Json => print_json(molecule)?,
                OutputFormat::Table | OutputFormat::Tsv => {
                    println!("{}", output::format_molecule_detail(molecule, use_colors))
                }
            }
        }
        Commands::Export { catalog: path, output: out } => {
            let records = catalog::load_catalog(&path)?;
            let scored: Vec<ScoredMolecule> = catalog::assemble_catalog(records, &scoring);
            catalog::save_scored_catalog(&out, &scored)?;
            println!("Exported {} scored molecules to {}", scored.len(), out.display());
        }
        Commands::Generate { count, seed, output: out } => {
            let records = catalog::generate_catalog(count, seed);
            catalog::save_catalog(&out, &records)?;
            println!("Generated {} molecules (seed {}) in {}", records.len(), seed, out.display());
        }
        Commands::Timeline {
            countries,
            strategy,
            from,
            format,
        } => {
            let timeline_config = config.effective_timeline();
            let table = timeline_config.table();
            let strategy = strategy.unwrap_or_else(|| timeline_config.effective_strategy());
            let selection = parse_selection(&countries, timeline_config.effective_review())?;

            for country in selection.countries() {
                if timeline::find_jurisdiction(&table, &country.code).is_none() {
                    eprintln!("Skipping unknown jurisdiction '{}'", country.code);
                }
            }

            let result = timeline::compute_timeline(selection.countries(), strategy, &table);
            match format {
                OutputFormat::Table => {
                    println!("{}", output::format_timeline(&result, &table, from, use_colors))
                }
                OutputFormat::Tsv => {
                    let tsv = output::format_timeline_tsv(&result);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                OutputFormat::Json => {
                    let report = TimelineReport {
                        strategy,
                        market_entries: from.map(|start| timeline::market_entry_dates(&result, start)),
                        timeline: result,
                    };
                    print_json(&report)?;
                }
            }
        }
        Commands::Jurisdictions => {
            let table = config.effective_timeline().table();
            println!("{}", output::format_jurisdictions(&table, use_colors));
        }
        Commands::Init { force } => return Ok(init(config_path, force)),
    }

    Ok(EXIT_SUCCESS)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineReport {
    strategy: FilingStrategy,
    #[serde(flatten)]
    timeline: timeline::Timeline,
    #[serde(skip_serializing_if = "Option::is_none")]
    market_entries: Option<Vec<timeline::MarketEntry>>,
}

/// Parse `CODE` / `CODE:review` arguments. Codes without an explicit review
/// track use `default_review`; repeated codes keep their first occurrence.
fn parse_selection(args: &[String], default_review: ReviewType) -> Result<Selection> {
    args.iter()
        .map(|arg| {
            if arg.contains(':') {
                arg.parse::<SelectedCountry>()
                    .with_context(|| format!("Invalid jurisdiction '{}'", arg))
            } else {
                Ok(SelectedCountry::new(arg, default_review))
            }
        })
        .collect::<Result<Vec<_>>>()
        .map(|countries| countries.into_iter().collect())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
