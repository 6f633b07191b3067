use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use value_averaging::prelude::*;

#[derive(Parser)]
#[command(name = "value-averaging")]
#[command(about = "A Rust-based value averaging backtesting engine", long_about = None)]
struct Cli {
    //log engine and loader activity at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //backtest one instrument against a benchmark
    Run {
        //path to csv price data for the traded instrument
        #[arg(long)]
        data: PathBuf,

        //path to csv price data for the benchmark index
        #[arg(long)]
        benchmark: PathBuf,

        //name shown in the output (defaults to the data file stem)
        #[arg(long)]
        label: Option<String>,

        //amount deployed in the first period
        #[arg(long, default_value = "10000")]
        initial_balance: f64,

        //target growth per period (0.01 = 1%)
        #[arg(long, default_value = "0.01")]
        growth_rate: f64,

        //csv column holding the price (defaults to the second column)
        #[arg(long)]
        price_column: Option<String>,

        //skip printing the full ledger table
        #[arg(long)]
        no_table: bool,

        //output path for ledger csv
        #[arg(long)]
        output_ledger_csv: Option<PathBuf>,

        //output path for chart series json
        #[arg(long)]
        output_chart_json: Option<PathBuf>,
    },

    //backtest every instrument in a json configuration file
    Batch {
        #[arg(long)]
        config: PathBuf,
    },

    //write the default batch configuration
    InitConfig {
        #[arg(long, default_value = "value-averaging.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            data,
            benchmark,
            label,
            initial_balance,
            growth_rate,
            price_column,
            no_table,
            output_ledger_csv,
            output_chart_json,
        } => {
            let label = label.unwrap_or_else(|| label_from_path(&data));
            let strategy = StrategyConfig {
                initial_balance,
                periodic_growth_rate: growth_rate,
            };
            run_single(
                &label,
                &data,
                &benchmark,
                &strategy,
                price_column.as_deref(),
                !no_table,
                output_ledger_csv.as_deref(),
                output_chart_json.as_deref(),
            )?;
        }
        Commands::Batch { config } => run_from_config(&config)?,
        Commands::InitConfig { output } => {
            BatchConfiguration::default().to_json_file(&output)?;
            println!("Default configuration written to {:?}", output);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn label_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "instrument".to_string())
}

//loads a traded/benchmark pair and checks they cover the same periods
fn load_pair(
    data: &Path,
    benchmark: &Path,
    price_column: Option<&str>,
) -> Result<(PriceSeries, PriceSeries)> {
    let traded = load_price_csv(data, price_column)
        .context(format!("Failed to load data from {:?}", data))?;
    let benchmark_series = load_price_csv(benchmark, price_column)
        .context(format!("Failed to load benchmark from {:?}", benchmark))?;

    ensure_aligned(&traded, &benchmark_series)
        .context(format!("{:?} and {:?} are not aligned", data, benchmark))?;

    Ok((traded, benchmark_series))
}

#[allow(clippy::too_many_arguments)]
fn run_single(
    label: &str,
    data: &Path,
    benchmark: &Path,
    strategy: &StrategyConfig,
    price_column: Option<&str>,
    show_table: bool,
    output_ledger_csv: Option<&Path>,
    output_chart_json: Option<&Path>,
) -> Result<()> {
    println!("Value Averaging Backtesting Engine");
    println!("==================================\n");

    let (traded, benchmark_series) = load_pair(data, benchmark, price_column)?;
    print_run_header(label, &traded, strategy);

    let ledger = BacktestEngine::new(strategy.clone())
        .run(&traded, &benchmark_series)
        .context(format!("Backtest failed for {}", label))?;

    report(label, &ledger, strategy, show_table);

    if let Some(path) = output_ledger_csv {
        write_ledger_csv(&ledger, path)?;
        println!("\nLedger saved to {:?}", path);
    }

    if let Some(path) = output_chart_json {
        let chart = derive_chart_series(&ledger).with_growth_rate(strategy.periodic_growth_rate);
        write_chart_json(&chart, path)?;
        println!("Chart series saved to {:?}", path);
    }

    Ok(())
}

fn run_from_config(path: &Path) -> Result<()> {
    println!("Value Averaging Backtesting Engine");
    println!("==================================\n");

    let config = BatchConfiguration::from_json_file(path)?;
    if config.instruments.is_empty() {
        anyhow::bail!("No instruments configured in {:?}", path);
    }

    let mut loaded = Vec::with_capacity(config.instruments.len());
    for instrument in &config.instruments {
        let benchmark = config.benchmark_for(instrument)?;
        let pair = load_pair(
            &instrument.data_path,
            benchmark,
            config.price_column.as_deref(),
        )?;
        loaded.push((instrument.label.as_str(), pair));
    }

    let runs: Vec<InstrumentRun> = loaded
        .iter()
        .map(|(label, (traded, benchmark))| InstrumentRun::new(label, traded, benchmark))
        .collect();

    info!(instruments = runs.len(), config = %path.display(), "running batch");
    let results = run_batch(&runs, &config.strategy)?;

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)
            .context(format!("Failed to create output directory {:?}", dir))?;
    }

    let mut failures = 0;
    for (label, result) in &results {
        let ledger = match result {
            Ok(ledger) => ledger,
            Err(err) => {
                warn!(label = %label, error = %err, "backtest rejected input");
                println!("{}: {}\n", label, err);
                failures += 1;
                continue;
            }
        };

        report(label, ledger, &config.strategy, true);

        if let Some(dir) = &config.output_dir {
            let ledger_path = dir.join(format!("{}_ledger.csv", label));
            let chart_path = dir.join(format!("{}_chart.json", label));
            write_ledger_csv(ledger, &ledger_path)?;
            let chart = derive_chart_series(ledger)
                .with_growth_rate(config.strategy.periodic_growth_rate);
            write_chart_json(&chart, &chart_path)?;
            println!("\nOutputs saved to {:?} and {:?}\n", ledger_path, chart_path);
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} backtests failed", failures, results.len());
    }

    Ok(())
}

fn print_run_header(label: &str, traded: &[PricePoint], strategy: &StrategyConfig) {
    println!("Loaded {} periods for {}", traded.len(), label);
    if let (Some(first), Some(last)) = (traded.first(), traded.last()) {
        println!("Date range: {} to {}", first.date, last.date);
    }
    println!("Initial balance: ${:.2}", strategy.initial_balance);
    println!(
        "Growth per period: {:.2}%\n",
        strategy.periodic_growth_rate * 100.0
    );
}

fn report(label: &str, ledger: &Ledger, strategy: &StrategyConfig, show_table: bool) {
    println!("{} Results", label);
    println!("{}\n", "=".repeat(label.len() + 8));

    if show_table {
        print_ledger(ledger);
        println!();
    }

    SummaryMetrics::from_ledger(ledger, strategy).pretty_print_table();
}
