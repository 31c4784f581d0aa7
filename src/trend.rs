//! ### Trend
//! US power-sector CO2 emissions and electricity demand, 2015-2035.
//! Sparse anchor years come from EIA history (Monthly Energy Review,
//! Electric Power Annual); 2035 is the midpoint of published projection
//! ranges (62.5% emissions cut and 26.5% demand growth over 2023).
//! Gaps are filled by linear interpolation.

use serde::Serialize;
use std::collections::BTreeMap;

pub const START_YEAR: i32 = 2015;
pub const END_YEAR: i32 = 2035;

/// CO2 emissions anchors in million metric tons.
const CO2_MMT: [(i32, f64); 11] = [
    (2015, 1750.0),
    (2016, 1650.0),
    (2017, 1600.0),
    (2018, 1620.0),
    (2019, 1550.0),
    (2020, 1451.0),
    (2021, 1553.0),
    (2022, 1539.0),
    (2023, 1421.0),
    (2024, 1427.0),
    (2035, 532.875),
];

/// Electricity demand anchors in TWh. 2023 is EIA retail sales; 2024 is
/// approximate from trend.
const DEMAND_TWH: [(i32, f64); 11] = [
    (2015, 3900.0),
    (2016, 3920.0),
    (2017, 3850.0),
    (2018, 4000.0),
    (2019, 3950.0),
    (2020, 3800.0),
    (2021, 3930.0),
    (2022, 4050.0),
    (2023, 3845.0),
    (2024, 3900.0),
    (2035, 4863.9),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "CO2_Emissions_Tons")]
    pub co2_tons: Option<f64>,
    #[serde(rename = "Energy_Demand_MWh")]
    pub demand_mwh: Option<f64>,
}

/// One point per year from 2015 through 2035, anchor years exact and
/// the rest linearly interpolated, converted to tons and MWh.
pub fn build_trend() -> Vec<TrendPoint> {
    let co2: BTreeMap<i32, f64> = CO2_MMT.into_iter().collect();
    let demand: BTreeMap<i32, f64> = DEMAND_TWH.into_iter().collect();

    (START_YEAR..=END_YEAR)
        .map(|year| TrendPoint {
            year,
            // million metric tons -> tons, TWh -> MWh
            co2_tons: interpolate(year, &co2).map(|mmt| mmt * 1e6),
            demand_mwh: interpolate(year, &demand).map(|twh| twh * 1e6),
        })
        .collect()
}

/// Linear interpolation between the nearest anchors. Years past the
/// last anchor hold its value; years before the first have no estimate.
fn interpolate(year: i32, anchors: &BTreeMap<i32, f64>) -> Option<f64> {
    if let Some(&value) = anchors.get(&year) {
        return Some(value);
    }
    let prev = anchors.range(..year).next_back();
    let next = anchors.range(year + 1..).next();
    match (prev, next) {
        (Some((&y0, &v0)), Some((&y1, &v1))) => {
            Some(v0 + (v1 - v0) * f64::from(year - y0) / f64::from(y1 - y0))
        }
        (Some((_, &v0)), None) => Some(v0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_year_inclusive() {
        let trend = build_trend();
        assert_eq!(trend.len(), 21);
        assert_eq!(trend.first().unwrap().year, 2015);
        assert_eq!(trend.last().unwrap().year, 2035);
        assert!(trend.iter().all(|p| p.co2_tons.is_some() && p.demand_mwh.is_some()));
    }

    #[test]
    fn anchor_years_are_exact_after_unit_conversion() {
        let trend = build_trend();
        let y2020 = trend.iter().find(|p| p.year == 2020).unwrap();
        assert_eq!(y2020.co2_tons, Some(1451.0 * 1e6));
        assert_eq!(y2020.demand_mwh, Some(3800.0 * 1e6));
        let y2035 = trend.iter().find(|p| p.year == 2035).unwrap();
        assert_eq!(y2035.co2_tons, Some(532.875 * 1e6));
        assert_eq!(y2035.demand_mwh, Some(4863.9 * 1e6));
    }

    #[test]
    fn gap_years_interpolate_linearly() {
        let trend = build_trend();
        let y2030 = trend.iter().find(|p| p.year == 2030).unwrap();
        let expected_mmt = 1427.0 + (532.875 - 1427.0) * 6.0 / 11.0;
        let got = y2030.co2_tons.unwrap();
        assert!((got - expected_mmt * 1e6).abs() < 1.0, "got {got}");
    }

    #[test]
    fn years_before_the_first_anchor_have_no_estimate() {
        let anchors: BTreeMap<i32, f64> = [(2020, 1.0), (2022, 3.0)].into_iter().collect();
        assert_eq!(interpolate(2019, &anchors), None);
        assert_eq!(interpolate(2021, &anchors), Some(2.0));
        assert_eq!(interpolate(2025, &anchors), Some(3.0));
    }
}
