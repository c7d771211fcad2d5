//! Complex Projection CLI
//!
//! Command-line interface for growth rates, projections and comparisons
//!
//! ```bash
//! complex_projection rates
//! complex_projection project "Banpo Raemian 84" --current 25.0 --target 30.0
//! complex_projection compare "Banpo Raemian 84" 25.0 "Jamsil Els 84" 27.0 --json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use complex_projection::{AnalysisConfig, ComplexReport, ComplexRequest, Comparison, PriceTable};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "complex_projection")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Price table CSV (overrides config and COMPLEX_DATA_PATH)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Anchor year for growth estimation (default: latest year in the table)
    #[arg(short, long, global = true)]
    evaluation_year: Option<i32>,

    /// Comma-separated projection horizons in years, e.g. 1,2,3,5,10
    #[arg(long, global = true, value_delimiter = ',')]
    horizons: Option<Vec<u32>>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every complex with its growth rate
    Rates,

    /// Project one complex
    Project {
        /// Complex label as it appears in the table
        complex: String,

        /// Latest transaction price (100M KRW)
        #[arg(long)]
        current: f64,

        /// Target price (100M KRW)
        #[arg(long)]
        target: Option<f64>,
    },

    /// Compare the complex you hold with one you are considering
    Compare {
        mine: String,
        mine_current: f64,
        other: String,
        other_current: f64,

        /// Target price for the held complex (100M KRW)
        #[arg(long)]
        mine_target: Option<f64>,

        /// Target price for the other complex (100M KRW)
        #[arg(long)]
        other_target: Option<f64>,
    },
}

impl Cli {
    fn analysis_config(&self) -> Result<AnalysisConfig> {
        let base = match &self.config {
            Some(path) => AnalysisConfig::from_json_path(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => AnalysisConfig::default(),
        };
        let mut config = base.with_env_overrides();

        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }
        if self.evaluation_year.is_some() {
            config.evaluation_year = self.evaluation_year;
        }
        if let Some(horizons) = &self.horizons {
            config.horizons = horizons.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.analysis_config()?;

    let table = PriceTable::from_config(&config)
        .with_context(|| format!("Failed to load price table {}", config.data_path.display()))?;

    match &cli.command {
        Commands::Rates => print_rates(&table, cli.json)?,
        Commands::Project {
            complex,
            current,
            target,
        } => {
            let request = ComplexRequest::new(complex.as_str(), *current, *target);
            let report = table.report(&request, &config.horizons)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Compare {
            mine,
            mine_current,
            other,
            other_current,
            mine_target,
            other_target,
        } => {
            let comparison = table.compare(
                &ComplexRequest::new(mine.as_str(), *mine_current, *mine_target),
                &ComplexRequest::new(other.as_str(), *other_current, *other_target),
                &config.horizons,
            )?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                print_comparison(&comparison);
            }
        }
    }

    Ok(())
}

fn print_rates(table: &PriceTable, json: bool) -> Result<()> {
    let summaries = table.growth_summaries();
    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("Evaluation year: {}", table.evaluation_year());
    println!("{:<32} {:>6} {:>6} {:>9} {:>8}", "Complex", "Base", "Years", "CAGR", "Peak");
    println!("{}", "-".repeat(65));
    for s in &summaries {
        let base = s.base_year.map(|y| y.to_string()).unwrap_or_else(|| "-".into());
        let span = s.span_years.map(|y| y.to_string()).unwrap_or_else(|| "-".into());
        let cagr = s
            .cagr
            .map(|g| format!("{:.2}%", g * 100.0))
            .unwrap_or_else(|| "n/a".into());
        let peak = s.peak_price.map(|p| format!("{:.1}", p)).unwrap_or_else(|| "-".into());
        println!("{:<32} {:>6} {:>6} {:>9} {:>8}", s.complex, base, span, cagr, peak);
    }
    Ok(())
}

fn print_report(report: &ComplexReport) {
    println!("### {}", report.complex);
    if let (Some(base), Some(span)) = (report.base_year, report.span_years) {
        println!("- Base year: {} ~ {} ({} years)", base, report.evaluation_year, span);
    }
    match (report.cagr, &report.cagr_error) {
        (Some(g), _) => println!("- Annual growth: {:.2}%", g * 100.0),
        (None, Some(reason)) => println!("- Annual growth: n/a ({})", reason),
        (None, None) => println!("- Annual growth: n/a"),
    }
    println!("- Current price: {}", report.current_price);

    println!("\nProjected prices:");
    for h in &report.projections {
        match h.price {
            Some(price) => println!("  in {} year(s): {:.1}", h.years, price),
            None => println!("  in {} year(s): n/a", h.years),
        }
    }

    if let Some(target) = report.displayed_target() {
        println!(
            "\nTarget reached around {} (about {} years)",
            target.date.format("%Y-%m-%d"),
            target.whole_years
        );
    }
    println!();
}

fn print_comparison(comparison: &Comparison) {
    print_report(&comparison.mine);
    print_report(&comparison.other);

    println!("## {} vs {}", comparison.mine.complex, comparison.other.complex);
    println!("Current gap (other - mine): {:.1}", comparison.current_gap);

    println!("\nProjected gaps:");
    for g in &comparison.horizon_gaps {
        if let Some(gap) = g.gap {
            println!("  in {} year(s): {:.1}", g.years, gap);
        }
    }

    println!("\nPeak prices:");
    for report in [&comparison.mine, &comparison.other] {
        let base = report.base_year.map(|y| y.to_string()).unwrap_or_else(|| "-".into());
        let peak = report.peak_price.map(|p| format!("{:.1}", p)).unwrap_or_else(|| "-".into());
        println!("  {}: {}~{} / peak {}", report.complex, base, report.evaluation_year, peak);
    }
}
