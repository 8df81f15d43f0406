//! seolens: SEO/GEO analysis CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use seolens::client::ProviderClient;
use seolens::config::{default_config_json, resolve_config, CliOverrides, Config, CONFIG_FILENAME};
use seolens::form::{
    Form, ANALYZE_FALLBACK, COMPARE_FALLBACK, GEO_FALLBACK, PERFORMANCE_FALLBACK,
    SUGGEST_FALLBACK,
};
use seolens::history::{load_history, previous_score, record_analysis, save_history, HistoryFile};
use seolens::input::parse_keyword_list;
use seolens::reporter::{ConsoleReporter, JsonReporter};
use seolens::scoring::format_score;
use seolens::trend;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// seolens: SEO and local search analysis from the command line
#[derive(Parser, Debug)]
#[command(name = "seolens")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Output format as JSON
    #[arg(long, short, global = true)]
    json: bool,

    /// Quiet mode (minimal output)
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Verbose output (also enables debug logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Provider base URL (overrides SEOLENS_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Request timeout in seconds (at least 1)
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Path to config file (default: search .seolensrc.json in current dir and parents)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimum overall score (exit 1 if below)
    #[arg(long, short, global = true)]
    threshold: Option<f64>,

    /// Do not read or write the analysis history
    #[arg(long, global = true)]
    no_history: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a single URL
    Analyze {
        /// URL to analyze (https:// is assumed when no scheme is given)
        url: String,
    },

    /// Compare two URLs category by category
    Compare { url1: String, url2: String },

    /// Local (GEO) analysis for a location
    Geo {
        /// Location, e.g. "Austin, TX"
        #[arg(long)]
        location: String,

        /// Comma-separated keywords
        #[arg(long)]
        keywords: String,
    },

    /// Keyword suggestions for a seed keyword
    Suggest { seed: String },

    /// Performance-only analysis of a URL
    Performance { url: String },

    /// Show recent analyses
    History {
        /// Remove all stored entries
        #[arg(long)]
        clear: bool,
    },

    /// Create .seolensrc.json with sensible defaults
    Init {
        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    if let Commands::Init { dir } = &args.command {
        return run_init(&args, dir.as_deref().unwrap_or(&cwd));
    }

    let overrides = CliOverrides {
        api_url: args.api_url.clone(),
        timeout_secs: args.timeout,
        threshold: args.threshold,
        no_history: args.no_history,
    };
    let config = resolve_config(&cwd, args.config.as_deref(), &overrides)?;
    debug!(?config, "resolved config");

    if let Commands::History { clear } = &args.command {
        return run_history(&args, &config, &cwd, *clear);
    }

    let client = ProviderClient::new(config.client_settings())?;
    debug!(base_url = client.base_url(), "provider client ready");

    match &args.command {
        Commands::Analyze { url } => run_analyze(&args, &config, &cwd, &client, url),
        Commands::Compare { url1, url2 } => run_compare(&args, &client, url1, url2),
        Commands::Geo { location, keywords } => run_geo(&args, &client, location, keywords),
        Commands::Suggest { seed } => run_suggest(&args, &client, seed),
        Commands::Performance { url } => run_performance(&args, &client, url),
        Commands::History { .. } | Commands::Init { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn console(args: &Args) -> ConsoleReporter {
    let reporter = ConsoleReporter::new();
    if args.verbose {
        reporter.verbose()
    } else {
        reporter
    }
}

/// Print the form's notice and return the error exit code
fn failed<T>(form: &Form<T>) -> ExitCode {
    if let Some(notice) = form.notice() {
        eprintln!("{}: {}", "Error".red().bold(), notice);
    }
    ExitCode::from(2)
}

fn run_analyze(
    args: &Args,
    config: &Config,
    cwd: &Path,
    client: &ProviderClient,
    url: &str,
) -> Result<ExitCode> {
    let mut form = Form::new("analyze", ANALYZE_FALLBACK);
    form.submit(|| client.analyze_url(url))?;
    let Some(record) = form.result() else {
        return Ok(failed(&form));
    };

    let history_path = config.history_path(cwd);
    let mut history = if config.history_enabled() {
        Some(load_history(&history_path))
    } else {
        None
    };
    let previous = history
        .as_ref()
        .and_then(|h| previous_score(h, &record.url));
    let trend = trend(record.score.overall, previous);

    if args.json {
        println!("{}", JsonReporter::new().pretty().report_analysis(record, &trend));
    } else if args.quiet {
        console(args).report_quiet(record, &trend);
    } else {
        console(args).report_analysis(record, &trend);
    }

    if let Some(history) = history.as_mut() {
        record_analysis(history, record);
        if let Err(e) = save_history(&history_path, history) {
            warn!(path = %history_path.display(), error = %e, "failed to save history");
        }
    }

    if let Some(threshold) = config.threshold {
        if record.score.overall < threshold {
            if !args.quiet && !args.json {
                eprintln!(
                    "\n{}: Score {} is below threshold {}",
                    "Failed".red().bold(),
                    format_score(record.score.overall),
                    format_score(threshold)
                );
            }
            return Ok(ExitCode::from(1));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_compare(args: &Args, client: &ProviderClient, url1: &str, url2: &str) -> Result<ExitCode> {
    let mut form = Form::new("compare", COMPARE_FALLBACK);
    form.submit(|| client.compare_urls(url1, url2))?;
    let Some(result) = form.result() else {
        return Ok(failed(&form));
    };

    if args.json {
        println!("{}", JsonReporter::new().pretty().report_comparison(result));
    } else {
        console(args).report_comparison(result);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_geo(
    args: &Args,
    client: &ProviderClient,
    location: &str,
    keywords: &str,
) -> Result<ExitCode> {
    let keywords = parse_keyword_list(keywords);
    let mut form = Form::new("geo", GEO_FALLBACK);
    form.submit(|| client.geo_analysis(location, &keywords))?;
    let Some(record) = form.result() else {
        return Ok(failed(&form));
    };

    if args.json {
        println!("{}", JsonReporter::new().pretty().report_geo(record));
    } else {
        console(args).report_geo(record);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_suggest(args: &Args, client: &ProviderClient, seed: &str) -> Result<ExitCode> {
    let mut form = Form::new("suggest", SUGGEST_FALLBACK);
    form.submit(|| client.keyword_suggestions(seed))?;
    let Some(suggestions) = form.result() else {
        return Ok(failed(&form));
    };

    if args.json {
        println!(
            "{}",
            JsonReporter::new().pretty().report_suggestions(seed, suggestions)
        );
    } else if args.quiet {
        for s in suggestions {
            println!("{}", s);
        }
    } else {
        console(args).report_suggestions(seed, suggestions);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_performance(args: &Args, client: &ProviderClient, url: &str) -> Result<ExitCode> {
    let mut form = Form::new("performance", PERFORMANCE_FALLBACK);
    form.submit(|| client.performance_metrics(url))?;
    let Some(report) = form.result() else {
        return Ok(failed(&form));
    };

    if args.json {
        println!(
            "{}",
            JsonReporter::new().pretty().report_performance(url, report)
        );
    } else {
        console(args).report_performance(url, report);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_history(args: &Args, config: &Config, cwd: &Path, clear: bool) -> Result<ExitCode> {
    let path = config.history_path(cwd);

    if clear {
        save_history(&path, &HistoryFile::default())
            .with_context(|| format!("Failed to clear history at {}", path.display()))?;
        if !args.quiet {
            eprintln!("{}: History cleared", "Info".blue());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let history = load_history(&path);
    if args.json {
        println!("{}", JsonReporter::new().pretty().report_history(&history.entries));
    } else {
        console(args).report_history(&history.entries);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_init(args: &Args, dir: &Path) -> Result<ExitCode> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let api_url = args
        .api_url
        .as_deref()
        .unwrap_or(seolens::client::DEFAULT_BASE_URL);
    std::fs::write(&config_path, default_config_json(api_url, args.threshold)).with_context(
        || format!("Failed to write config to {}", config_path.display()),
    )?;

    if !args.quiet {
        eprintln!(
            "{}: Created {}",
            "Info".blue(),
            config_path.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}
