use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use findash::{
    chart::{ChartDuration, ChartRequest, ChartWindow, load_chart},
    config::FindashConfig,
    errors::FindashError,
    portfolio::{
        DEFAULT_PORTFOLIO_SIZE, DEFAULT_PORTFOLIO_YEARS, PortfolioRequest, load_portfolio,
    },
    report::{render_chart_text, render_json, render_portfolio_text, render_text},
    service::{ProjectionRequest, run_projection},
};
use market_data_ingestor::{
    constituents::ConstituentScraper,
    models::timeframe::TimeFrame,
    providers::yahoo_chart::YahooChartProvider,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "VN30 constituents and Monte Carlo price projections")]
struct Cli {
    /// Config file; falls back to $FINDASH_CONFIG, then built-in defaults.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the current index constituents, one per line.
    Tickers {
        /// Print bare exchange codes instead of Yahoo symbols.
        #[arg(long)]
        no_suffix: bool,
    },
    /// Project future prices for one ticker.
    Project(ProjectArgs),
    /// Show bars with SMA50 and MACD for one ticker.
    Chart(ChartArgs),
    /// Show aligned daily closes for several tickers.
    Portfolio(PortfolioArgs),
}

#[derive(Args)]
struct ChartArgs {
    /// Yahoo symbol, e.g. FPT.VN.
    #[arg(long)]
    ticker: String,
    /// Bar interval: 1d, 1wk, 1mo, or an intraday interval such as 15m or 1h.
    #[arg(long, default_value = "1d")]
    interval: TimeFrame,
    /// Preset window: 1M, 3M, 6M, YTD, 1Y, 3Y, 5Y or MAX. Defaults to 1Y.
    #[arg(long, conflicts_with_all = ["start", "end"])]
    duration: Option<ChartDuration>,
    /// First day of an explicit window (YYYY-MM-DD).
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,
    /// Last day of an explicit window (YYYY-MM-DD).
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,
    /// Include pre- and post-market bars on intraday intervals.
    #[arg(long)]
    pre_post: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PortfolioArgs {
    /// Comma-separated Yahoo symbols; defaults to the first few constituents.
    #[arg(long, value_delimiter = ',')]
    tickers: Vec<String>,
    /// Years of daily history.
    #[arg(
        long,
        default_value_t = DEFAULT_PORTFOLIO_YEARS,
        value_parser = clap::value_parser!(u32).range(1..=50)
    )]
    years: u32,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ProjectArgs {
    /// Yahoo symbol, e.g. HPG.VN.
    #[arg(long)]
    ticker: String,
    /// Number of simulated paths.
    #[arg(long)]
    paths: Option<usize>,
    /// Trading days to simulate.
    #[arg(long)]
    horizon: Option<usize>,
    /// Calendar days of history to estimate volatility from.
    #[arg(long)]
    lookback_days: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    /// Percentile of the terminal distribution used for VaR.
    #[arg(long)]
    percentile: Option<f64>,
    /// Simulate paths in parallel.
    #[arg(long)]
    parallel: bool,
    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "command failed");
            match err.downcast_ref::<FindashError>() {
                Some(app) => eprintln!("{}", app.user_message()),
                None => eprintln!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = FindashConfig::load(cli.config.as_deref()).map_err(FindashError::from)?;

    match cli.cmd {
        Cmd::Tickers { no_suffix } => {
            let yahoo_suffix = config.constituents.yahoo_suffix && !no_suffix;
            for ticker in constituents(&config, yahoo_suffix).await? {
                println!("{ticker}");
            }
        }
        Cmd::Chart(args) => {
            let window = match (args.start, args.end) {
                (Some(start), Some(end)) => ChartWindow::Dates { start, end },
                _ => ChartWindow::Preset(args.duration.unwrap_or(ChartDuration::OneYear)),
            };
            let request = ChartRequest {
                ticker: args.ticker,
                interval: args.interval,
                window,
                include_pre_post: args.pre_post,
            };
            let provider = yahoo(&config)?;
            let chart = load_chart(&provider, &request, Utc::now()).await?;

            if args.json {
                println!("{}", render_json(&chart).context("serializing chart")?);
            } else {
                print!("{}", render_chart_text(&chart));
            }
        }
        Cmd::Portfolio(args) => {
            let tickers = if args.tickers.is_empty() {
                let mut all = constituents(&config, true).await?;
                all.truncate(DEFAULT_PORTFOLIO_SIZE);
                all
            } else {
                args.tickers
            };
            let request = PortfolioRequest {
                tickers,
                years: args.years,
            };
            let provider = yahoo(&config)?;
            let trend = load_portfolio(&provider, &request, Utc::now()).await?;

            if args.json {
                println!("{}", render_json(&trend).context("serializing portfolio")?);
            } else {
                print!("{}", render_portfolio_text(&trend));
            }
        }
        Cmd::Project(args) => {
            let sim = &config.simulation;
            let mut request = ProjectionRequest::from_config(args.ticker, sim);
            if let Some(paths) = args.paths {
                request.params.path_count = paths;
            }
            if let Some(horizon) = args.horizon {
                request.params.horizon_steps = horizon;
            }
            if let Some(days) = args.lookback_days {
                request.lookback_days = days;
            }
            if let Some(pct) = args.percentile {
                request.params.percentile = pct;
            }
            if args.seed.is_some() {
                request.seed = args.seed;
            }
            request.parallel |= args.parallel;

            sim.check_offered(request.params.path_count, request.params.horizon_steps)?;

            let provider = yahoo(&config)?;
            let outcome = run_projection(&provider, &request, Utc::now()).await?;

            if args.json {
                println!("{}", render_json(&outcome).context("serializing report")?);
            } else {
                print!("{}", render_text(&outcome));
            }
        }
    }
    Ok(())
}

async fn constituents(config: &FindashConfig, yahoo_suffix: bool) -> Result<Vec<String>> {
    let scraper = ConstituentScraper::new(
        config.constituents.url.clone(),
        yahoo_suffix,
        Duration::from_secs(config.provider.timeout_secs),
        &config.provider.user_agent,
    )
    .map_err(FindashError::from)?;
    Ok(scraper.fetch().await.map_err(FindashError::from)?)
}

fn yahoo(config: &FindashConfig) -> Result<YahooChartProvider> {
    Ok(YahooChartProvider::with_config(config.provider.clone()).map_err(FindashError::from)?)
}
