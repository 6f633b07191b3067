use approx::assert_relative_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use value_averaging::prelude::*;

const LEVERAGED_CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2014-06-01,10.0,10.5,9.8,10.2,10.2,1000
2014-07-01,12.0,12.4,11.7,12.1,12.1,1200
2014-08-01,11.123456,11.5,10.9,11.2,11.2,900
";

const INDEX_CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2014-06-01,20.0,20.5,19.8,20.2,20.2,5000
2014-07-01,22.0,22.4,21.7,22.1,22.1,5200
2014-08-01,21.0,21.5,20.9,21.2,21.2,4900
";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_named_column_and_rounds_prices() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "SPUU.csv", LEVERAGED_CSV);

    let series = load_price_csv(&path, Some("Open")).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].date.to_string(), "2014-06-01");
    assert!(series[0].date.as_date().is_some());
    assert_eq!(series[2].price, 11.1235);

    let closes = load_price_csv(&path, Some("close")).unwrap();
    assert_eq!(closes[1].price, 12.1);
}

#[test]
fn defaults_to_second_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "monthly.csv", "month,price\n2014-06,10\n2014-07,12\n");

    let series = load_price_csv(&path, None).unwrap();
    assert_eq!(series[0].date, PeriodDate::Label("2014-06".to_string()));
    assert_eq!(series[1].price, 12.0);
}

#[test]
fn reports_bad_price_with_line_number() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "bad.csv", "Date,Open\n2014-06-01,10\n2014-07-01,null\n");

    let err = load_price_csv(&path, None).unwrap_err();
    assert!(format!("{:#}", err).contains("line 3"));
}

#[test]
fn unknown_column_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "SPUU.csv", LEVERAGED_CSV);
    assert!(load_price_csv(&path, Some("Bid")).is_err());
}

#[test]
fn end_to_end_ledger_and_chart_exports() {
    let dir = TempDir::new().unwrap();
    let traded_path = write_file(dir.path(), "SPUU.csv", LEVERAGED_CSV);
    let index_path = write_file(dir.path(), "IVV.csv", INDEX_CSV);

    let traded = load_price_csv(&traded_path, Some("Open")).unwrap();
    let benchmark = load_price_csv(&index_path, Some("Open")).unwrap();
    ensure_aligned(&traded, &benchmark).unwrap();

    let config = StrategyConfig::default();
    let ledger = BacktestEngine::new(config.clone())
        .run(&traded, &benchmark)
        .unwrap();
    assert_eq!(ledger.len(), 3);

    let ledger_path = dir.path().join("SPUU_ledger.csv");
    write_ledger_csv(&ledger, &ledger_path).unwrap();

    let contents = fs::read_to_string(&ledger_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "date,price,held_volume,held_value,period_action_volume,period_cash_flow,\
         cumulative_cash_flow,target_balance,control_value,benchmark_price,benchmark_value"
    );

    let first: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(first[0], "2014-06-01");
    assert_eq!(first[2], "");
    assert_eq!(first[3], "");
    assert_eq!(first[4].parse::<f64>().unwrap(), 1000.0);

    let second: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(second[2].parse::<f64>().unwrap(), 1000.0);
    assert_eq!(second[4].parse::<f64>().unwrap(), -158.3333);
    assert_eq!(second[6].parse::<f64>().unwrap(), -8100.0);

    let chart_path = dir.path().join("SPUU_chart.json");
    let chart = derive_chart_series(&ledger).with_growth_rate(config.periodic_growth_rate);
    write_chart_json(&chart, &chart_path).unwrap();

    let back: ChartSeries =
        serde_json::from_str(&fs::read_to_string(&chart_path).unwrap()).unwrap();
    assert_eq!(back, chart);
    assert_eq!(back.total_balance[..2], [0.0, 2000.0]);
    assert_eq!(back.total_balance_label, "Total Balance at 1% Growth");
    assert_eq!(back.control_label, "Control");

    let summary = SummaryMetrics::from_ledger(&ledger, &config);
    assert_relative_eq!(
        summary.final_control_value,
        rounded(1000.0 * 11.1235),
        epsilon = 1e-9
    );
}

#[test]
fn batch_configuration_round_trips_through_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let config = BatchConfiguration::default();
    config.to_json_file(&path).unwrap();
    let back = BatchConfiguration::from_json_file(&path).unwrap();

    assert_eq!(back, config);
    assert_eq!(back.instruments.len(), 2);
}

#[test]
fn batch_over_shared_benchmark() {
    let dir = TempDir::new().unwrap();
    let spuu = write_file(dir.path(), "SPUU.csv", LEVERAGED_CSV);
    let ivv = write_file(dir.path(), "IVV.csv", INDEX_CSV);

    let traded = load_price_csv(&spuu, Some("Open")).unwrap();
    let doubled: Vec<PricePoint> = traded
        .iter()
        .map(|p| PricePoint::new(p.date.clone(), p.price * 2.0))
        .collect();
    let benchmark = load_price_csv(&ivv, Some("Open")).unwrap();

    let runs = [
        InstrumentRun::new("SPUU", &traded, &benchmark),
        InstrumentRun::new("DOUBLE", &doubled, &benchmark),
    ];
    let results = run_batch(&runs, &StrategyConfig::default()).unwrap();

    let spuu_ledger = results["SPUU"].as_ref().unwrap();
    let double_ledger = results["DOUBLE"].as_ref().unwrap();

    //same benchmark slice gives identical benchmark columns
    for (a, b) in spuu_ledger.iter().zip(double_ledger) {
        assert_eq!(a.benchmark_value, b.benchmark_value);
        assert_eq!(a.target_balance, b.target_balance);
    }
}
