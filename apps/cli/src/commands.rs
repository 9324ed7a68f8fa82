//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use regiontree_core::classifier::classify;
use regiontree_core::exporter::ExportOptions;
use regiontree_core::pipeline::{ConvertConfig, ConvertResult, ProgressReporter};
use regiontree_shared::{AppConfig, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// regiontree: nest the administrative-division registry by region.
#[derive(Parser)]
#[command(
    name = "regiontree",
    version,
    about = "Turn the flat administrative-division registry into one nested JSON tree per region.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.regiontree/regiontree.toml.
    #[arg(long, global = true, env = "REGIONTREE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert a registry table into per-region JSON documents.
    Convert {
        /// Registry table (UTF-8 CSV or tab-separated text).
        input: PathBuf,

        /// Output directory (defaults to the configured output dir).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Field delimiter, e.g. ',' or '\t'.
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Write single-line JSON.
        #[arg(long)]
        compact: bool,

        /// Build the trees and report counts without writing files.
        #[arg(long)]
        dry_run: bool,
    },

    /// Show how names are classified.
    Classify {
        /// Full hierarchical names, e.g. "서울특별시 종로구 청운동".
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "regiontree=info",
        1 => "regiontree=debug",
        _ => "regiontree=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Convert {
            input,
            out,
            delimiter,
            compact,
            dry_run,
        } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_convert(config, input, out, delimiter.as_deref(), compact, dry_run)
        }
        Command::Classify { names } => cmd_classify(&names),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    Ok(match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    })
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_convert(
    mut config: AppConfig,
    input: PathBuf,
    out: Option<PathBuf>,
    delimiter: Option<&str>,
    compact: bool,
    dry_run: bool,
) -> Result<()> {
    if let Some(d) = delimiter {
        config.source.delimiter = parse_delimiter(d)?;
    }
    config.source.delimiter_byte()?;

    let output_dir = out.unwrap_or_else(|| PathBuf::from(&config.output.dir));

    let convert_config = ConvertConfig {
        input,
        output_dir,
        source: config.source,
        export: ExportOptions {
            pretty: config.output.pretty && !compact,
        },
        dry_run,
    };

    info!(
        input = %convert_config.input.display(),
        out = %convert_config.output_dir.display(),
        dry_run,
        "converting registry"
    );

    let reporter = CliProgress::new();
    let result = regiontree_core::pipeline::convert(&convert_config, &reporter)?;

    // Print summary
    println!();
    if dry_run {
        println!("  Dry run: nothing written.");
    } else {
        println!("  Region documents written to {}", convert_config.output_dir.display());
    }
    println!("  Rows:      {}", result.rows_read);
    println!("  Active:    {}", result.active_rows);
    println!("  Excluded:  {}", result.excluded_rows);
    println!("  Regions:   {}", result.regions.len());
    for region in &result.regions {
        println!(
            "    {} {} ({} districts, {} localities)",
            region.code, region.name, region.districts, region.localities
        );
    }
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

/// Accept a literal character or the escapes `\t` / `tab`.
fn parse_delimiter(raw: &str) -> Result<char> {
    match raw {
        "\\t" | "tab" => return Ok('\t'),
        _ => {}
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(eyre!("delimiter must be a single character, got '{raw}'")),
    }
}

fn cmd_classify(names: &[String]) -> Result<()> {
    for name in names {
        let classification = classify(name);
        let line = serde_json::json!({
            "name": name,
            "classification": classification,
        });
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn record_classified(&self, current: usize, total: usize) {
        if current % 1000 == 0 || current == total {
            self.spinner
                .set_message(format!("Classifying [{current}/{total}]"));
        }
    }

    fn region_written(&self, region: &str, path: &Path) {
        self.spinner
            .set_message(format!("Wrote {region} → {}", path.display()));
    }

    fn done(&self, _result: &ConvertResult) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_delimiter_variants() {
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert_eq!(parse_delimiter("\\t").unwrap(), '\t');
        assert_eq!(parse_delimiter("tab").unwrap(), '\t');
        assert_eq!(parse_delimiter("|").unwrap(), '|');
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn convert_flags_parse() {
        let cli = Cli::try_parse_from([
            "regiontree",
            "convert",
            "registry.csv",
            "--out",
            "out",
            "--compact",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Command::Convert {
                input,
                out,
                compact,
                dry_run,
                delimiter,
            } => {
                assert_eq!(input, PathBuf::from("registry.csv"));
                assert_eq!(out, Some(PathBuf::from("out")));
                assert!(compact && dry_run);
                assert!(delimiter.is_none());
            }
            _ => panic!("expected convert"),
        }
    }
}
