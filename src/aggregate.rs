//! ### Aggregate
//! Rolls tables of 5-minute instantaneous power snapshots (MW) up to
//! daily energy totals (MWh), plus the small amount of table algebra
//! the export steps need (rename, date join, share columns).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use thiserror::Error;

/// Timestamp column names recognized in raw exports, checked in order.
/// Older exports use "Time", newer ones "Interval Start".
pub const TIMESTAMP_COLUMNS: [&str; 2] = ["Time", "Interval Start"];

/// Sampling cadence of the raw CAISO exports, in minutes.
pub const SAMPLE_MINUTES: u32 = 5;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error(r#"no timestamp column among {headers:?}; expected "Time" or "Interval Start""#)]
    Schema { headers: Vec<String> },

    #[error("unparsable timestamp: {0:?}")]
    Parse(String),

    #[error("input table has no rows")]
    EmptyInput,
}

/// A raw CSV export: one timestamp column plus any number of value
/// columns. Cells stay strings; numeric classification happens during
/// the rollup so descriptive columns can be dropped instead of erroring.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow {
    pub date: NaiveDate,
    /// One slot per series; `None` means the series was never observed
    /// on this date, which is distinct from a measured zero.
    pub values: Vec<Option<f64>>,
}

/// Daily MWh totals, one row per calendar date observed in the input,
/// sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTable {
    pub series: Vec<String>,
    pub rows: Vec<DailyRow>,
}

/// Converts 5-minute MW snapshots to daily MWh totals.
///
/// Each observed sample contributes `mw * interval_minutes / 60` MWh to
/// its calendar day. Day boundaries follow the timestamp's own offset,
/// not UTC. Days never present in the input are never synthesized, and
/// a day where a series has no observed cells yields `None` for that
/// cell rather than a silent zero.
///
/// `interval_minutes` must match the true cadence of the source data;
/// it is not validated against the actual timestamp deltas.
pub fn aggregate_daily(
    table: &RawTable,
    interval_minutes: u32,
) -> Result<DailyTable, AggregateError> {
    if table.rows.is_empty() {
        return Err(AggregateError::EmptyInput);
    }

    let ts_idx = TIMESTAMP_COLUMNS
        .iter()
        .find_map(|name| table.headers.iter().position(|header| header == name))
        .ok_or_else(|| AggregateError::Schema {
            headers: table.headers.clone(),
        })?;

    let stamps: Vec<DateTime<FixedOffset>> = table
        .rows
        .iter()
        .map(|row| parse_timestamp(cell(row, ts_idx)))
        .collect::<Result<_, _>>()?;

    let numeric: Vec<usize> = (0..table.headers.len())
        .filter(|&idx| idx != ts_idx && is_numeric_column(&table.rows, idx))
        .collect();
    let series: Vec<String> = numeric
        .iter()
        .map(|&idx| table.headers[idx].clone())
        .collect();

    let mut days: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    for (row, stamp) in table.rows.iter().zip(&stamps) {
        let totals = days
            .entry(stamp.date_naive())
            .or_insert_with(|| vec![None; numeric.len()]);
        for (slot, &col) in totals.iter_mut().zip(&numeric) {
            if let Some(mw) = parse_cell(cell(row, col)) {
                let mwh = mw * f64::from(interval_minutes) / 60.0;
                *slot = Some(slot.unwrap_or(0.0) + mwh);
            }
        }
    }

    Ok(DailyTable {
        series,
        rows: days
            .into_iter()
            .map(|(date, values)| DailyRow { date, values })
            .collect(),
    })
}

impl DailyTable {
    pub fn series_index(&self, name: &str) -> Option<usize> {
        self.series.iter().position(|series| series == name)
    }

    /// Returns false if `from` is not a series of this table.
    pub fn rename_series(&mut self, from: &str, to: &str) -> bool {
        match self.series_index(from) {
            Some(idx) => {
                self.series[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Inner join on the date key: dates absent from either side are
    /// dropped, and the left table's date order is kept. Series names
    /// are assumed disjoint between the two sides.
    pub fn inner_join(&self, other: &DailyTable) -> DailyTable {
        let mut series = self.series.clone();
        series.extend(other.series.iter().cloned());

        let right: BTreeMap<NaiveDate, &Vec<Option<f64>>> = other
            .rows
            .iter()
            .map(|row| (row.date, &row.values))
            .collect();

        let rows = self
            .rows
            .iter()
            .filter_map(|row| {
                right.get(&row.date).map(|extra| DailyRow {
                    date: row.date,
                    values: row.values.iter().chain(extra.iter()).copied().collect(),
                })
            })
            .collect();

        DailyTable { series, rows }
    }

    /// Appends a `<series>_share` column for every series other than
    /// `reference`, holding that series' value divided by the reference
    /// value on the same date. A share is `None` when either operand is
    /// missing or the reference is zero. Returns false if `reference`
    /// is not a series of this table.
    pub fn add_share_columns(&mut self, reference: &str) -> bool {
        let Some(ref_idx) = self.series_index(reference) else {
            return false;
        };
        let base: Vec<usize> = (0..self.series.len()).filter(|&idx| idx != ref_idx).collect();

        for &idx in &base {
            self.series.push(format!("{}_share", self.series[idx]));
        }
        for row in &mut self.rows {
            let total = row.values[ref_idx];
            for &idx in &base {
                let share = match (row.values[idx], total) {
                    (Some(value), Some(total)) if total != 0.0 => Some(value / total),
                    _ => None,
                };
                row.values.push(share);
            }
        }
        true
    }
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Empty cells are missing samples, not zeros.
fn parse_cell(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

/// A column is numeric iff it holds at least one value and every
/// non-empty cell parses as a float. All-text columns (zone names,
/// notes) get dropped from the rollup this way.
fn is_numeric_column(rows: &[Vec<String>], idx: usize) -> bool {
    let mut saw_value = false;
    for row in rows {
        let raw = cell(row, idx).trim();
        if raw.is_empty() {
            continue;
        }
        if raw.parse::<f64>().is_err() {
            return false;
        }
        saw_value = true;
    }
    saw_value
}

fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, AggregateError> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp);
    }
    if let Ok(stamp) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%#z") {
        return Ok(stamp);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, fmt) {
            // No offset on the wire: keep the wall-clock date as-is.
            return Ok(stamp.and_utc().fixed_offset());
        }
    }
    Err(AggregateError::Parse(raw.to_string()))
}
