use anyhow::ensure;
use clap::Parser;
use grid_analysis::aggregate::{self, SAMPLE_MINUTES};
use grid_analysis::{convert, graph::Graphing, trend};
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
enum Args {
    /// Takes raw 5-min MW snapshot CSVs (fuel mix or system load, with
    /// either a "Time" or "Interval Start" timestamp column) and rolls
    /// them up to daily MWh totals.
    /*
    cargo run roll-up-daily \
        --snapshot-csv \
        data/caiso_fuel_mix_2024Q1.csv \
        data/caiso_fuel_mix_2024Q2.csv \
        --output-csv results/mix_daily.csv
    */
    RollUpDaily {
        /// A list of input CSV files to aggregate into a single output.
        /// Files must share a header row.
        #[clap(short, long, num_args = 1.., value_delimiter = ' ')]
        snapshot_csv: Vec<PathBuf>,

        /// An output file that the daily totals are written to
        #[clap(short, long)]
        output_csv: PathBuf,
    },

    /// Rolls a fuel-mix csv and a load csv up to daily MWh, joins them
    /// on date (dates missing from either side are dropped), and
    /// appends a share-of-load column per fuel.
    // cargo run write-daily-merged data/mix.csv data/load.csv results/daily.csv
    WriteDailyMerged {
        /// A raw 5-min fuel mix csv, one column per generation source
        mix_csv: PathBuf,

        /// A raw 5-min system load csv with a "Load" column
        load_csv: PathBuf,

        /// Where the merged output csv will be written
        csv_out: PathBuf,
    },

    /// Writes the interpolated 2015-2035 CO2 emissions + energy demand
    /// trend table. The same data is charted by graph-trend.
    // cargo run write-trend results/trend.csv
    WriteTrend {
        /// Where the output csv will be written
        csv_out: PathBuf,
    },

    /// Writes the per-fuel emission factor, cost, and generation bound
    /// lookup table.
    // cargo run write-fuel-factors results/fuel_factors.csv
    WriteFuelFactors {
        /// Where the output csv will be written
        csv_out: PathBuf,
    },

    /// Renders the 2015-2035 CO2 + demand trend as a dual-axis png.
    // cargo run graph-trend results/co2_energy_plot.png
    GraphTrend {
        /// Where the output PNG file will be written.
        output_png: PathBuf,
    },

    /// Renders a daily rollup csv (from roll-up-daily) as a line chart
    /// with one series per column.
    // cargo run graph-daily-mix results/mix_daily.csv results/mix_daily.png
    GraphDailyMix {
        /// A csv of the form output by roll-up-daily
        daily_csv: PathBuf,

        /// Where the output PNG file will be written.
        output_png: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    match Args::parse() {
        Args::RollUpDaily {
            snapshot_csv,
            output_csv,
        } => {
            let table = convert::read_raw_table(&snapshot_csv)?;
            let daily = aggregate::aggregate_daily(&table, SAMPLE_MINUTES)?;
            convert::write_daily_csv(&output_csv, &daily)?;
        }
        Args::WriteDailyMerged {
            mix_csv,
            load_csv,
            csv_out,
        } => {
            let mix = aggregate::aggregate_daily(&convert::read_raw_table(&[&mix_csv])?, SAMPLE_MINUTES)?;
            let mut load =
                aggregate::aggregate_daily(&convert::read_raw_table(&[&load_csv])?, SAMPLE_MINUTES)?;
            ensure!(
                load.rename_series("Load", "CAISO_Load_MWh"),
                "{} has no Load column",
                load_csv.display()
            );
            let mut merged = mix.inner_join(&load);
            ensure!(
                merged.add_share_columns("CAISO_Load_MWh"),
                "merged table lost the load column"
            );
            convert::write_daily_csv(&csv_out, &merged)?;
        }
        Args::WriteTrend { csv_out } => {
            convert::write_trend_csv(&csv_out, &trend::build_trend())?;
        }
        Args::WriteFuelFactors { csv_out } => {
            convert::write_fuel_factors_csv(&csv_out)?;
        }
        Args::GraphTrend { output_png } => {
            Graphing::new(&output_png).co2_demand_trend(&trend::build_trend())?;
        }
        Args::GraphDailyMix {
            daily_csv,
            output_png,
        } => {
            let daily = convert::read_daily_csv(&daily_csv)?;
            Graphing::new(&output_png).daily_mix(&daily, "Daily generation by source")?;
        }
    }
    Ok(())
}
