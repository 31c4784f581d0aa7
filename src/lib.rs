//! Data prep and charting for electricity-sector analysis: rolls raw
//! 5-minute CAISO MW snapshots up to daily MWh totals, carries the static
//! per-fuel emission/cost lookup tables, and renders the 2015-2035 US
//! CO2-vs-demand trend.

pub mod aggregate;
pub mod convert;
pub mod factors;
pub mod graph;
pub mod trend;
