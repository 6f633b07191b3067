use crate::data::point::{PeriodDate, PricePoint, PriceSeries};
use crate::engine::rounding::rounded;
use anyhow::{anyhow, bail, Context, Result};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::info;

//column used when no price column is named (open price in a yahoo export)
const DEFAULT_PRICE_INDEX: usize = 1;

//loads a price series from a headered csv file
//the first column is the period date, the price comes from the named column
//or the second column when none is given
pub fn load_price_csv<P: AsRef<Path>>(path: P, price_column: Option<&str>) -> Result<PriceSeries> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let headers = reader
        .headers()
        .context(format!("Failed to read CSV header: {:?}", path))?
        .clone();

    let price_index = match price_column {
        Some(name) => headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("Column '{}' not found in {:?}", name, path))?,
        None => DEFAULT_PRICE_INDEX,
    };

    let mut series = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let line = index + 2;
        let record = result.context(format!("Failed to parse CSV record at line {}", line))?;

        let date = record
            .get(0)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| anyhow!("Missing date at line {}", line))?;

        let raw_price = record
            .get(price_index)
            .ok_or_else(|| anyhow!("Missing price column at line {}", line))?;

        let price: f64 = raw_price.parse().context(format!(
            "Failed to parse price '{}' at line {}",
            raw_price, line
        ))?;

        series.push(PricePoint::new(PeriodDate::parse(date), rounded(price)));
    }

    info!(path = %path.display(), periods = series.len(), "loaded price series");

    Ok(series)
}

//checks that two series cover the same periods in the same order
pub fn ensure_aligned(traded: &[PricePoint], benchmark: &[PricePoint]) -> Result<()> {
    if traded.len() != benchmark.len() {
        bail!(
            "Series length mismatch: traded has {} periods, benchmark has {}",
            traded.len(),
            benchmark.len()
        );
    }

    if let Some((index, (t, b))) = traded
        .iter()
        .zip(benchmark)
        .enumerate()
        .find(|(_, (t, b))| t.date != b.date)
    {
        bail!(
            "Series dates diverge at index {}: traded {} vs benchmark {}",
            index,
            t.date,
            b.date
        );
    }

    Ok(())
}
