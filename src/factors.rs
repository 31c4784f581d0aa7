//! ### Factors
//! Static per-fuel lookup tables and constraint bounds used as inputs
//! to the dispatch analysis, plus a loader for the per-state demand
//! csv. Arrays are indexed by position in [`FUELS`].

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const FUELS: [&str; 7] = ["coal", "lng", "nuclear", "hydro", "wind", "solar", "ev"];

/// Lifecycle carbon intensity per fuel, gCO2e per kWh.
pub const EMISSIONS_G_PER_KWH: [f64; 7] = [820.0, 490.0, 12.0, 24.0, 11.5, 44.5, 0.0];

/// Unit production cost per fuel, $ per kWh.
pub const COSTS_USD_PER_KWH: [f64; 7] = [10.0, 17.2, 6.1, 1.75, 6.1, 4.1, 0.0];

/// Generation ceiling per fuel, as a fraction of total demand.
pub const MAX_GEN_SHARE: [f64; 7] = [1.0, 1.0, 0.33, 1.0, 0.33, 0.25, 0.0];

/// Generation floor per fuel, as a fraction of total demand.
pub const MIN_GEN_SHARE: [f64; 7] = [0.0, 0.0, 0.2, 0.0, 0.0, 0.0, 0.0];

/// Statewide ceiling on total CO2 emissions, gCO2e.
pub const MAX_CO2_G: f64 = 13.8e7;

/// Average EV battery capacity, kWh.
pub const EV_CAPACITY_KWH: f64 = 80.0;

/// Daily EV energy floor, kWh: safety factor x avg annual miles /
/// avg miles per kWh / days per year.
pub const EV_DAILY_MIN_KWH: f64 = 5.0 * 11106.0 / 3.5 / 365.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelFactorRow {
    #[serde(rename = "Fuel")]
    pub fuel: &'static str,
    #[serde(rename = "Emissions_gCO2e_per_kWh")]
    pub emissions_g_per_kwh: f64,
    #[serde(rename = "Cost_USD_per_kWh")]
    pub cost_usd_per_kwh: f64,
    #[serde(rename = "Min_Gen_Share")]
    pub min_gen_share: f64,
    #[serde(rename = "Max_Gen_Share")]
    pub max_gen_share: f64,
}

/// The per-fuel tables zipped into one exportable row per fuel.
pub fn fuel_factor_rows() -> Vec<FuelFactorRow> {
    (0..FUELS.len())
        .map(|idx| FuelFactorRow {
            fuel: FUELS[idx],
            emissions_g_per_kwh: EMISSIONS_G_PER_KWH[idx],
            cost_usd_per_kwh: COSTS_USD_PER_KWH[idx],
            min_gen_share: MIN_GEN_SHARE[idx],
            max_gen_share: MAX_GEN_SHARE[idx],
        })
        .collect()
}

/// Per-capita electricity demand by state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDemand {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Demand_kWh")]
    pub demand_kwh: f64,
}

pub fn load_state_demand(path: &Path) -> anyhow::Result<Vec<StateDemand>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening state demand csv {}", path.display()))?;
    let mut states = Vec::new();
    for line in reader.deserialize() {
        states.push(line?);
    }
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fuel_has_a_full_set_of_factors() {
        let rows = fuel_factor_rows();
        assert_eq!(rows.len(), FUELS.len());
        for row in &rows {
            assert!(row.min_gen_share <= row.max_gen_share, "{}", row.fuel);
            assert!(row.emissions_g_per_kwh >= 0.0);
        }
    }

    #[test]
    fn ev_daily_floor_fits_in_the_battery() {
        assert!(EV_DAILY_MIN_KWH > 0.0);
        assert!(EV_DAILY_MIN_KWH < EV_CAPACITY_KWH);
    }

    #[test]
    fn state_demand_csv_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "grid_analysis_state_demand_{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, "State,Demand_kWh\nCA,6500\nTX,14000\n").unwrap();

        let states = load_state_demand(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(states.len(), 2);
        assert_eq!(states[0].state, "CA");
        assert_eq!(states[1].demand_kwh, 14000.0);
    }
}
