//! ThickMap command-line front end

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use thickmap::{
    analyze, init_logging, AnalysisRequest, ExpandedField, InspectionConfig, LogFormat,
    SourceMatrix, BUILD_DATE, VERSION,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "thickmap")]
#[command(about = "Map wall-thickness readings onto a cylinder and report thin areas", long_about = None)]
#[command(version)]
struct Cli {
    /// Log output format (pretty or json)
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a measurement matrix, classify it and write the report as JSON
    Analyze {
        /// JSON file holding the readings as nested arrays, one per row
        #[arg(long)]
        matrix: PathBuf,

        /// Inspection config (.toml or .json); defaults to the user config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Report output path; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Write a default inspection config
    InitConfig {
        /// Target path; defaults to the user config file
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, default_value = "false")]
        force: bool,
    },

    /// Load and validate an inspection config
    CheckConfig {
        /// Config file to check
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format)?;
    info!("ThickMap {} (built {})", VERSION, BUILD_DATE);

    match cli.command {
        Commands::Analyze {
            matrix,
            config,
            output,
        } => run_analyze(&matrix, config.as_deref(), output.as_deref()),
        Commands::InitConfig { path, force } => run_init_config(path, force),
        Commands::CheckConfig { file } => run_check_config(&file),
    }
}

fn load_config(path: Option<&Path>) -> Result<InspectionConfig> {
    if let Some(path) = path {
        return InspectionConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    match InspectionConfig::default_path() {
        Ok(default) if default.exists() => InspectionConfig::load_from_file(&default)
            .with_context(|| format!("Failed to load config {}", default.display())),
        _ => {
            warn!("No inspection config found, using defaults");
            Ok(InspectionConfig::default())
        }
    }
}

fn run_analyze(matrix: &Path, config: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;

    let text = std::fs::read_to_string(matrix)
        .with_context(|| format!("Failed to read matrix {}", matrix.display()))?;
    let source: SourceMatrix = serde_json::from_str(&text)
        .with_context(|| format!("Invalid measurement matrix in {}", matrix.display()))?;

    let mut request = AnalysisRequest::new(source, config.geometry, config.policy)
        .with_units(config.units)
        .with_header(config.header);
    request.critical_cell_limit = config.report.critical_cell_limit;

    let mut report = analyze(&request)?;
    if config.report.flip_vertical {
        report.field = ExpandedField::from_grid(report.field.grid().flipped_rows());
    }
    for warning in &report.warnings {
        eprintln!("warning: {}", warning);
    }

    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn run_init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => InspectionConfig::default_path()?,
    };
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }

    InspectionConfig::default().save_to_file(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn run_check_config(file: &Path) -> Result<()> {
    let config = InspectionConfig::load_from_file(file)
        .with_context(|| format!("Config {} is invalid", file.display()))?;

    let factors = config.geometry.expansion_factors();
    println!("{}: OK", file.display());
    println!("  policy:    {}", config.policy.kind());
    println!("  units:     {}", config.units);
    if let Some(report_no) = &config.header.report_no {
        println!("  report:    {}", report_no);
    }
    println!(
        "  expansion: {:.3} x rows, {:.3} x columns",
        factors.rows, factors.cols
    );
    Ok(())
}
