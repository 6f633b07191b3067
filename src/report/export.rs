use crate::engine::Ledger;
use crate::metrics::ChartSeries;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

//writes the ledger as csv, one record per row with a header line
//rows without a holding leave the holding columns empty
pub fn write_ledger_csv(ledger: &Ledger, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .context(format!("Failed to create ledger CSV {:?}", path))?;

    for row in ledger {
        writer
            .serialize(row)
            .context(format!("Failed to write ledger row for {}", row.date))?;
    }

    writer.flush()?;
    Ok(())
}

//writes the chart series as pretty json
pub fn write_chart_json(chart: &ChartSeries, path: &Path) -> Result<()> {
    let file = File::create(path).context(format!("Failed to create chart JSON {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, chart)?;
    writer.flush()?;
    Ok(())
}
