//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::{CsvAdapter, write_indicator_csv};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::analysis::{Analysis, StrategySelection, analyze};
use crate::domain::error::SignalError;
use crate::domain::scan::{ScanReport, load_series, scan};
use crate::domain::scoring::MAX_SCORE;
use crate::domain::settings::{Settings, load_settings};
use crate::domain::strategy::StrategyKind;
use crate::domain::timeframe::{Interval, Lookback};
use crate::domain::universe::{Universe, parse_symbols};
use crate::logging;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "signalscore",
    about = "Technical-indicator buy scores with entry/target/stop levels"
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Where bars come from; flags override the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct DataArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Bar interval: 1m, 5m, 15m, 30m, 1h, 1d, 1wk
    #[arg(long)]
    pub interval: Option<String>,
    /// Lookback: 5d, 1mo, 3mo, 6mo, 1y, 2y, max
    #[arg(long)]
    pub period: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score one symbol
    Analyze {
        #[arg(short = 'S', long)]
        symbol: String,
        /// day, swing, position, composite, or all
        #[arg(short, long)]
        strategy: Option<String>,
        /// Write closes, Bollinger bands and levels to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,
        #[command(flatten)]
        data: DataArgs,
    },
    /// Score a universe of symbols and list those above the threshold
    Scan {
        /// Comma-separated symbols; defaults to the config list
        #[arg(long)]
        symbols: Option<String>,
        #[arg(short, long)]
        strategy: Option<String>,
        #[arg(short, long)]
        threshold: Option<u8>,
        #[command(flatten)]
        data: DataArgs,
    },
    /// List symbols with data for the configured interval
    ListSymbols {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    logging::init(cli.verbose);

    match cli.command {
        Command::Analyze {
            symbol,
            strategy,
            export,
            data,
        } => run_analyze(&symbol, strategy.as_deref(), export.as_deref(), &data),
        Command::Scan {
            symbols,
            strategy,
            threshold,
            data,
        } => run_scan(symbols.as_deref(), strategy.as_deref(), threshold, &data),
        Command::ListSymbols { data } => run_list_symbols(&data),
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: SignalError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(&err)
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, SignalError> {
    FileConfigAdapter::from_file(path).map_err(|e| SignalError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Settings from the config file (or defaults), with command-line overrides.
pub fn resolve_settings(data: &DataArgs) -> Result<Settings, SignalError> {
    let mut settings = match &data.config {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            load_settings(&load_config(path)?)?
        }
        None => Settings::default(),
    };

    if let Some(dir) = &data.data_dir {
        settings.data_dir = dir.clone();
    }
    if let Some(interval) = &data.interval {
        settings.request.interval = interval.parse::<Interval>()?;
    }
    if let Some(period) = &data.period {
        settings.request.lookback = period.parse::<Lookback>()?;
    }
    Ok(settings)
}

/// Command-line list first, then the config list, then the built-in universe.
pub fn resolve_symbols(cli_symbols: Option<&str>, settings: &Settings) -> Result<Vec<String>, SignalError> {
    if let Some(list) = cli_symbols {
        return Ok(parse_symbols(list)?);
    }
    Ok(settings
        .scan_symbols
        .clone()
        .unwrap_or_else(|| Universe::default().symbols))
}

pub fn run_analyze_pipeline(
    port: &dyn DataPort,
    symbol: &str,
    settings: &Settings,
    selection: StrategySelection,
    report: &mut dyn ReportPort,
    export: Option<&Path>,
) -> Result<Analysis, SignalError> {
    let symbol = symbol.trim().to_uppercase();
    let series = load_series(port, &symbol, &settings.request)?;
    eprintln!(
        "Loaded {} {} bars for {} ({})",
        series.len(),
        series.interval(),
        symbol,
        settings.request.lookback
    );

    let strategies = selection.build(&settings.strategies);
    let analysis = analyze(&series, &strategies, &settings.thresholds);
    report.write_analysis(&analysis)?;

    if let Some(path) = export {
        let levels = analysis
            .primary()
            .or_else(|| analysis.results.iter().find(|r| r.levels().is_some()))
            .and_then(|r| r.levels());
        let file = File::create(path)?;
        write_indicator_csv(BufWriter::new(file), &series, levels)?;
        eprintln!("Indicators written to: {}", path.display());
    }

    Ok(analysis)
}

pub fn run_scan_pipeline(
    port: &(dyn DataPort + Sync),
    symbols: &[String],
    settings: &Settings,
    kind: StrategyKind,
    report: &mut dyn ReportPort,
) -> Result<ScanReport, SignalError> {
    eprintln!(
        "Scanning {} symbols with the {} strategy ({} {})",
        symbols.len(),
        kind,
        settings.request.interval,
        settings.request.lookback
    );
    let strategy = kind.build(&settings.strategies);
    let result = scan(
        port,
        symbols,
        &settings.request,
        &strategy,
        &settings.scan_options,
    );
    report.write_scan(&result)?;
    Ok(result)
}

fn analyze_command(
    symbol: &str,
    strategy: Option<&str>,
    export: Option<&Path>,
    data: &DataArgs,
) -> Result<Analysis, SignalError> {
    let settings = resolve_settings(data)?;
    let selection = match strategy {
        Some(s) => s.parse::<StrategySelection>()?,
        None => settings.selection,
    };
    let port = CsvAdapter::new(settings.data_dir.clone());
    let mut report = TextReportAdapter::new(io::stdout());
    run_analyze_pipeline(&port, symbol, &settings, selection, &mut report, export)
}

fn run_analyze(
    symbol: &str,
    strategy: Option<&str>,
    export: Option<&Path>,
    data: &DataArgs,
) -> ExitCode {
    match analyze_command(symbol, strategy, export, data) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn scan_command(
    symbols: Option<&str>,
    strategy: Option<&str>,
    threshold: Option<u8>,
    data: &DataArgs,
) -> Result<ScanReport, SignalError> {
    let mut settings = resolve_settings(data)?;
    if let Some(threshold) = threshold {
        if threshold > MAX_SCORE {
            return Err(SignalError::config_invalid(
                "scan",
                "threshold",
                format!("threshold must be between 0 and {MAX_SCORE}"),
            ));
        }
        settings.scan_options.threshold = threshold;
    }
    let kind = match strategy {
        Some(s) => s.parse::<StrategyKind>()?,
        None => match settings.selection {
            StrategySelection::One(kind) => kind,
            StrategySelection::All => StrategyKind::Composite,
        },
    };
    let symbols = resolve_symbols(symbols, &settings)?;
    let port = CsvAdapter::new(settings.data_dir.clone());
    let mut report = TextReportAdapter::new(io::stdout());
    run_scan_pipeline(&port, &symbols, &settings, kind, &mut report)
}

fn run_scan(
    symbols: Option<&str>,
    strategy: Option<&str>,
    threshold: Option<u8>,
    data: &DataArgs,
) -> ExitCode {
    match scan_command(symbols, strategy, threshold, data) {
        Ok(report) => {
            if !report.skipped.is_empty() {
                eprintln!(
                    "Scored {} of {} symbols",
                    report.scanned - report.skipped.len(),
                    report.scanned
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_list_symbols(data: &DataArgs) -> ExitCode {
    let settings = match resolve_settings(data) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    let port = CsvAdapter::new(settings.data_dir.clone());

    match port.list_symbols(settings.request.interval) {
        Ok(symbols) if symbols.is_empty() => {
            eprintln!(
                "No symbols found for interval {} in {}",
                settings.request.interval,
                settings.data_dir.display()
            );
            ExitCode::SUCCESS
        }
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{}", symbol);
            }
            eprintln!("{} symbols found", symbols.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn describe_weights<W: std::fmt::Debug>(name: &str, weights: &W) {
    eprintln!("  [{}] {:?}", name, weights);
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let settings = match load_config(config_path).and_then(|c| load_settings(&c)) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    eprintln!("\nData:");
    eprintln!("  dir:      {}", settings.data_dir.display());
    eprintln!("  interval: {}", settings.request.interval);
    eprintln!("  period:   {}", settings.request.lookback);

    eprintln!("\nAnalysis:");
    eprintln!("  strategy:   {}", settings.selection);
    eprintln!("  strong_buy: {}", settings.thresholds.strong_buy);
    eprintln!("  watch:      {}", settings.thresholds.watch);

    eprintln!("\nScan:");
    match &settings.scan_symbols {
        Some(symbols) => eprintln!("  symbols:    {}", symbols.join(", ")),
        None => eprintln!("  symbols:    (default universe)"),
    }
    eprintln!("  threshold:  {}", settings.scan_options.threshold);
    eprintln!(
        "  levels:     +{:.1}% / -{:.1}%",
        settings.scan_options.target_pct * 100.0,
        settings.scan_options.stop_pct * 100.0
    );

    eprintln!("\nWeights:");
    describe_weights("day", &settings.strategies.day);
    describe_weights("swing", &settings.strategies.swing);
    describe_weights("position", &settings.strategies.position);
    describe_weights("composite", &settings.strategies.composite);

    eprintln!("\nConfiguration is valid");
    ExitCode::SUCCESS
}
