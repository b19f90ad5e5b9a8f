use analytics::{BAND_LABELS, DashboardEngine, MarginDistribution, MonthlySeries, RunwayConfig};
use anyhow::Context;
use api_client::HttpReportsClient;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::load_config;
use core_types::ReportFilter;
use report_store::ReportStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The main entry point for the finsight dashboard application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load FINSIGHT_API_TOKEN and friends from .env if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dashboard(args) => handle_dashboard(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Computes and renders financial dashboards from raw report data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the report collection and render the derived dashboard metrics.
    Dashboard(DashboardArgs),
}

#[derive(Parser)]
struct DashboardArgs {
    /// Only include reports created on or after this date (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only include reports created on or before this date (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Emit the dashboard report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Dashboard Command Logic
// ==============================================================================

/// Handles the orchestration of the dashboard computation.
async fn handle_dashboard(args: DashboardArgs) -> anyhow::Result<()> {
    let config = load_config().context("failed to load config.toml")?;
    let token =
        std::env::var("FINSIGHT_API_TOKEN").context("FINSIGHT_API_TOKEN must be set")?;

    let client = HttpReportsClient::new(&config.api, &token)?;
    let store = ReportStore::new(Arc::new(client));

    let filter = ReportFilter {
        from: args.from,
        to: args.to,
    };
    store.refresh(&filter).await;
    let snapshot = store.snapshot();
    info!(
        records = snapshot.reports.len(),
        "computing dashboard metrics"
    );

    let runway_config = RunwayConfig {
        horizon_months: config.dashboard.horizon_months,
        gauge_min: config.dashboard.gauge_min,
        gauge_max: config.dashboard.gauge_max,
    };
    let report = DashboardEngine::new().calculate(&snapshot.reports, &runway_config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    render_series("Revenue Growth Rate (%)", &report.revenue_growth);
    render_series("Gross Burn", &report.burn_rate);
    render_margins(&report.margin_distribution);
    match report.runway.runway_months {
        Some(months) => println!(
            "Cash runway: {} months ({}% of gauge)",
            months.round_dp(1),
            report.runway.gauge_pct
        ),
        None => println!(
            "Cash runway: no net burn ({}% of gauge)",
            report.runway.gauge_pct
        ),
    }

    Ok(())
}

fn render_series(title: &str, series: &MonthlySeries) {
    let mut table = Table::new();
    table.set_header(vec!["Month", title]);
    for (label, value) in series.labels().iter().zip(&series.values) {
        table.add_row(vec![label.to_string(), value.round_dp(2).to_string()]);
    }
    println!("{table}");
}

fn render_margins(distribution: &MarginDistribution) {
    let mut table = Table::new();
    table.set_header(vec!["Margin Band", "Reports"]);
    for (label, count) in BAND_LABELS.iter().zip(&distribution.counts) {
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    println!("{table}");
}
