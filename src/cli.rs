//! CLI definition and dispatch.
//!
//! Results go to stdout; progress and diagnostics go through `tracing` (stderr).

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig, BacktestResult};
use crate::domain::comparison::{compare, load_series, Comparison};
use crate::domain::config_validation::{backtest_config, data_settings, validate_config, DataSettings};
use crate::domain::error::TrendscoreError;
use crate::domain::score::MAX_SCORE;
use crate::domain::snapshot::Snapshot;
use crate::domain::universe::{Instrument, InstrumentMap};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "trendscore", about = "Indicator scoring and threshold backtests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score one instrument and print its recommendation and ATR levels
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: String,
    },
    /// Score several instruments and rank them
    Compare {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated names; defaults to every configured symbol
        #[arg(short, long)]
        symbols: Option<String>,
    },
    /// Run the walk-forward threshold backtest for one instrument
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: String,
        /// Overrides [backtest] threshold
        #[arg(short, long)]
        threshold: Option<u8>,
        /// Print every closed trade
        #[arg(long)]
        trades: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the configured instrument map
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Everything a command needs once the config has been read and checked.
pub struct Context {
    pub data: DataSettings,
    pub instruments: InstrumentMap,
    pub backtest: BacktestConfig,
}

impl Context {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TrendscoreError> {
        Ok(Context {
            data: data_settings(config)?,
            instruments: InstrumentMap::from_config(config)?,
            backtest: backtest_config(config)?,
        })
    }

    pub fn load(path: &Path) -> Result<Self, TrendscoreError> {
        Self::from_config(&load_config(path)?)
    }

    pub fn data_port(&self) -> CsvAdapter {
        CsvAdapter::new(self.data.path.clone())
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TrendscoreError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Analyze { config, symbol } => run_analyze(&config, &symbol),
        Command::Compare { config, symbols } => run_compare(&config, symbols.as_deref()),
        Command::Backtest {
            config,
            symbol,
            threshold,
            trades,
        } => run_backtest_command(&config, &symbol, threshold, trades),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn analyze_instrument(
    data: &dyn DataPort,
    settings: &DataSettings,
    instrument: &Instrument,
) -> Result<Snapshot, TrendscoreError> {
    let series = load_series(data, instrument, settings.period, settings.interval)?;
    Snapshot::from_series(&series)
}

pub fn backtest_instrument(
    data: &dyn DataPort,
    settings: &DataSettings,
    instrument: &Instrument,
    config: &BacktestConfig,
) -> Result<BacktestResult, TrendscoreError> {
    let series = load_series(data, instrument, settings.period, settings.interval)?;
    info!(
        symbol = %instrument.name,
        bars = series.len(),
        threshold = config.threshold,
        "running backtest"
    );
    run_backtest(&series, config)
}

/// Instruments named in `list`, or the whole map when no list is given.
pub fn resolve_instruments(
    map: &InstrumentMap,
    list: Option<&str>,
) -> Result<Vec<Instrument>, TrendscoreError> {
    match list {
        Some(names) => map.select(names),
        None => Ok(map.iter().cloned().collect()),
    }
}

fn run_analyze(config_path: &Path, symbol: &str) -> Result<(), TrendscoreError> {
    let ctx = Context::load(config_path)?;
    let instrument = ctx.instruments.resolve(symbol)?;
    let snapshot = analyze_instrument(&ctx.data_port(), &ctx.data, instrument)?;
    print!("{}", format_snapshot(&instrument.name, &snapshot));
    Ok(())
}

fn run_compare(config_path: &Path, symbols: Option<&str>) -> Result<(), TrendscoreError> {
    let ctx = Context::load(config_path)?;
    let instruments = resolve_instruments(&ctx.instruments, symbols)?;
    info!(count = instruments.len(), "comparing instruments");
    let comparison = compare(
        &ctx.data_port(),
        &instruments,
        ctx.data.period,
        ctx.data.interval,
    );
    print!("{}", format_comparison(&comparison));
    Ok(())
}

fn run_backtest_command(
    config_path: &Path,
    symbol: &str,
    threshold: Option<u8>,
    show_trades: bool,
) -> Result<(), TrendscoreError> {
    let ctx = Context::load(config_path)?;
    let instrument = ctx.instruments.resolve(symbol)?;

    let mut config = ctx.backtest.clone();
    if let Some(t) = threshold {
        if t > MAX_SCORE {
            return Err(TrendscoreError::ConfigInvalid {
                section: "backtest".into(),
                key: "threshold".into(),
                reason: format!("threshold must be between 0 and {MAX_SCORE}"),
            });
        }
        config.threshold = t;
    }

    let result = backtest_instrument(&ctx.data_port(), &ctx.data, instrument, &config)?;
    print!(
        "{}",
        format_backtest(&instrument.name, &config, &result, show_trades)
    );
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), TrendscoreError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;
    let ctx = Context::from_config(&config)?;
    println!("Config OK: {}", config_path.display());
    println!(
        "  data:      {} (period {}, interval {})",
        ctx.data.path.display(),
        ctx.data.period,
        ctx.data.interval
    );
    println!("  symbols:   {}", ctx.instruments.len());
    println!(
        "  backtest:  threshold {}, capital {:.2}, start index {}",
        ctx.backtest.threshold, ctx.backtest.initial_capital, ctx.backtest.start_index
    );
    Ok(())
}

fn run_list_symbols(config_path: &Path) -> Result<(), TrendscoreError> {
    let ctx = Context::load(config_path)?;
    let data = ctx.data_port();
    for instrument in ctx.instruments.iter() {
        let marker = if data.has_data(&instrument.ticker) {
            ""
        } else {
            "  (no data file)"
        };
        println!("{:<10} {}{}", instrument.name, instrument.ticker, marker);
    }
    Ok(())
}

pub fn format_snapshot(name: &str, snap: &Snapshot) -> String {
    let b = &snap.breakdown;
    let mut out = String::new();
    out.push_str(&format!("{} ({})  as of {}\n", name, snap.symbol, snap.as_of));
    out.push_str(&format!(
        "Score:          {}  {}\n",
        snap.score, snap.recommendation
    ));
    out.push_str(&format!("  momentum      {:>2}/20\n", b.momentum));
    out.push_str(&format!("  trend         {:>2}/20\n", b.trend));
    out.push_str(&format!("  flow          {:>2}/20\n", b.flow));
    out.push_str(&format!("  strength      {:>2}/15\n", b.strength));
    out.push_str(&format!("  supertrend    {:>2}/15\n", b.supertrend));
    out.push_str(&format!("  band          {:>2}/10\n", b.band));
    out.push_str(&format!("Last close:     {:.2}\n", snap.last_close));
    out.push_str(&format!("Stop loss:      {:.2}\n", snap.stop_loss));
    out.push_str(&format!("Target:         {:.2}\n", snap.target));
    out
}

pub fn format_comparison(comparison: &Comparison) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<10} {:>7} {:<6} {:>12}\n",
        "#", "SYMBOL", "SCORE", "REC", "LAST CLOSE"
    ));
    for (rank, row) in comparison.rows.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:<10} {:>7} {:<6} {:>12.2}\n",
            rank + 1,
            row.symbol,
            row.score.to_string(),
            row.recommendation.label(),
            row.last_close
        ));
    }
    if !comparison.skipped.is_empty() {
        out.push_str("\nSkipped:\n");
        for skipped in &comparison.skipped {
            out.push_str(&format!("  {}: {}\n", skipped.symbol, skipped.reason));
        }
    }
    out
}

pub fn format_backtest(
    name: &str,
    config: &BacktestConfig,
    result: &BacktestResult,
    show_trades: bool,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Backtest: {} ===\n", name));
    out.push_str(&format!("Threshold:        {}\n", config.threshold));
    out.push_str(&format!("Days evaluated:   {}\n", result.decisions.len()));
    out.push_str(&format!("Initial capital:  {:.2}\n", result.initial_capital));
    out.push_str(&format!("Final capital:    {:.2}\n", result.final_capital));
    out.push_str(&format!("Return:           {:.2}%\n", result.return_pct()));
    out.push_str(&format!("Closed trades:    {}\n", result.trades.len()));
    out.push_str(&format!(
        "Open position:    {}\n",
        if result.ends_long() { "long" } else { "flat" }
    ));

    if show_trades && !result.trades.is_empty() {
        out.push_str("\nTrades:\n");
        for t in &result.trades {
            out.push_str(&format!(
                "  {} -> {}  {:.2} -> {:.2}  {:+.2}%  pnl {:+.2}\n",
                t.entry_date,
                t.exit_date,
                t.entry_price,
                t.exit_price,
                t.return_pct(),
                t.pnl
            ));
        }
    }
    out
}
