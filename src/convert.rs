//! ### Convert
//! CSV ingestion and export around the `aggregate` module: raw CAISO
//! snapshot files in, daily rollup / trend / factor tables out.

use crate::aggregate::{DailyRow, DailyTable, RawTable};
use crate::factors;
use crate::trend::TrendPoint;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use std::path::Path;

/// Reads one or more raw snapshot CSVs into a single table. Quarterly
/// export files share a header row, so inputs are concatenated after
/// checking the headers match.
pub fn read_raw_table(inputs: &[impl AsRef<Path>]) -> anyhow::Result<RawTable> {
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(input)
            .with_context(|| format!("opening {}", input.display()))?;

        let file_headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        match &headers {
            None => headers = Some(file_headers),
            Some(expected) if *expected == file_headers => {}
            Some(expected) => bail!(
                "{} headers {file_headers:?} do not match {expected:?}",
                input.display()
            ),
        }

        for line in reader.records() {
            let line = line?;
            rows.push(line.iter().map(str::to_string).collect());
        }
    }

    let Some(headers) = headers else {
        bail!("no input csv files given");
    };
    Ok(RawTable { headers, rows })
}

/// Writes a daily table with the date promoted to an explicit "Date"
/// column. Missing cells become empty fields, never zeros.
pub fn write_daily_csv(output: &Path, daily: &DailyTable) -> anyhow::Result<()> {
    let mut out_csv = csv::Writer::from_path(output)?;

    let mut header = vec!["Date".to_string()];
    header.extend(daily.series.iter().cloned());
    out_csv.write_record(&header)?;

    for row in &daily.rows {
        let mut record = vec![row.date.to_string()];
        record.extend(
            row.values
                .iter()
                .map(|value| value.map(|v| v.to_string()).unwrap_or_default()),
        );
        out_csv.write_record(&record)?;
    }
    out_csv.flush()?;
    Ok(())
}

/// Reads a daily table previously written by [`write_daily_csv`].
pub fn read_daily_csv(input: &Path) -> anyhow::Result<DailyTable> {
    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("opening {}", input.display()))?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let Some(date_idx) = headers.iter().position(|header| header == "Date") else {
        bail!("{} has no Date column", input.display());
    };
    let series: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != date_idx)
        .map(|(_, header)| header.clone())
        .collect();

    let mut rows = Vec::new();
    for line in reader.records() {
        let line = line?;
        let date: NaiveDate = line[date_idx]
            .parse()
            .with_context(|| format!("bad date {:?} in {}", &line[date_idx], input.display()))?;
        let values = line
            .iter()
            .enumerate()
            .filter(|&(idx, _)| idx != date_idx)
            .map(|(_, raw)| {
                let raw = raw.trim();
                if raw.is_empty() {
                    Ok(None)
                } else {
                    raw.parse::<f64>().map(Some)
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("bad value on {date} in {}", input.display()))?;
        rows.push(DailyRow { date, values });
    }

    Ok(DailyTable { series, rows })
}

/// Writes the interpolated 2015-2035 CO2 + demand table.
pub fn write_trend_csv(output: &Path, trend: &[TrendPoint]) -> anyhow::Result<()> {
    let mut out_csv = csv::Writer::from_path(output)?;
    for point in trend {
        out_csv.serialize(point)?;
    }
    out_csv.flush()?;
    Ok(())
}

/// Writes the per-fuel emission/cost/bound lookup table.
pub fn write_fuel_factors_csv(output: &Path) -> anyhow::Result<()> {
    let mut out_csv = csv::Writer::from_path(output)?;
    for row in factors::fuel_factor_rows() {
        out_csv.serialize(row)?;
    }
    out_csv.flush()?;
    Ok(())
}
