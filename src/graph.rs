//! ### Graph
//! Renders tables from the `aggregate` and `trend` modules in
//! shareable format.

use anyhow::anyhow;
use plotters::backend::BitMapBackend;
use plotters::chart::ChartBuilder;
use plotters::chart::SeriesLabelPosition;
use plotters::drawing::IntoDrawingArea;
use plotters::element::Circle;
use plotters::prelude::Rectangle;
use plotters::series::LineSeries;
use plotters::style::full_palette::BLUE_600;
use plotters::style::Color;
use plotters::style::Palette;
use plotters::style::Palette99;
use plotters::style::RGBColor;
use plotters::style::BLACK;
use plotters::style::RED;
use plotters::style::WHITE;
use std::cmp::Ordering;
use std::path::Path;

use crate::aggregate::DailyTable;
use crate::trend::{TrendPoint, END_YEAR, START_YEAR};

pub struct Graphing<'a> {
    path: &'a Path,
}

impl<'a> Graphing<'a> {
    const CHART_COLOR: RGBColor = WHITE;

    pub fn new(path: &'a Path) -> Self {
        Graphing { path }
    }

    /// Dual-axis line chart of the 2015-2035 trend: CO2 tons on the
    /// left axis, demand MWh on the right.
    pub fn co2_demand_trend(&self, trend: &[TrendPoint]) -> anyhow::Result<()> {
        let co2: Vec<(i32, f64)> = trend
            .iter()
            .filter_map(|point| point.co2_tons.map(|tons| (point.year, tons)))
            .collect();
        let demand: Vec<(i32, f64)> = trend
            .iter()
            .filter_map(|point| point.demand_mwh.map(|mwh| (point.year, mwh)))
            .collect();

        // NaN seed so an empty series stays non-finite and is rejected.
        let co2_max = co2.iter().map(|&(_, val)| val).fold(f64::NAN, f64::max);
        let demand_max = demand
            .iter()
            .map(|&(_, val)| val)
            .fold(f64::NAN, f64::max);
        if !co2_max.is_finite() || !demand_max.is_finite() {
            return Err(anyhow!("trend has no plottable points"));
        }

        let root = BitMapBackend::new(self.path, (1200, 700)).into_drawing_area();
        root.fill(&Self::CHART_COLOR)?;

        let mut chart = ChartBuilder::on(&root)
            .x_label_area_size(60)
            .y_label_area_size(96)
            .right_y_label_area_size(96)
            .margin(20)
            .caption(
                "US Electricity CO2 Emissions and Energy Demand (2015-2035)",
                ("sans-serif", 32.),
            )
            .build_cartesian_2d(START_YEAR..(END_YEAR + 1), 0f64..(co2_max * 1.1))?
            .set_secondary_coord(START_YEAR..(END_YEAR + 1), 0f64..(demand_max * 1.1));

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .bold_line_style(WHITE.mix(0.3))
            .y_desc("Total CO2 Emissions (tons)")
            .x_desc("Year")
            .axis_desc_style(("sans-serif", 24))
            .x_label_formatter(&|year| year.to_string())
            .y_label_formatter(&|tons| format!("{tons:.2e}"))
            .x_labels(21)
            .y_labels(10)
            .x_label_style(("sans-serif", 16))
            .y_label_style(("sans-serif", 16))
            .draw()?;

        chart
            .configure_secondary_axes()
            .y_desc("Total Energy Demand (MWh)")
            .axis_desc_style(("sans-serif", 24))
            .y_label_formatter(&|mwh| format!("{mwh:.2e}"))
            .label_style(("sans-serif", 16))
            .draw()?;

        chart
            .draw_series(LineSeries::new(co2.iter().copied(), RED.stroke_width(3)))?
            .label("CO2 Emissions")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], RED.filled()));
        chart.draw_series(
            co2.iter()
                .map(|&(year, tons)| Circle::new((year, tons), 4, RED.filled())),
        )?;

        chart
            .draw_secondary_series(LineSeries::new(
                demand.iter().copied(),
                BLUE_600.stroke_width(3),
            ))?
            .label("Energy Demand")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE_600.filled()));

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(("sans-serif", 16))
            .draw()?;

        root.present()?;

        Ok(())
    }

    /// Line chart of a daily rollup, one series per column. Days where
    /// a series was never observed are skipped rather than drawn as
    /// zero.
    pub fn daily_mix(&self, daily: &DailyTable, caption: &str) -> anyhow::Result<()> {
        let observed = daily
            .rows
            .iter()
            .flat_map(|row| row.values.iter().flatten());
        let mwh_min = observed
            .clone()
            .min_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal))
            .ok_or_else(|| anyhow!("Failed to compute chart min"))?;
        let mwh_max = observed
            .max_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal))
            .ok_or_else(|| anyhow!("Failed to compute chart max"))?;

        let root = BitMapBackend::new(self.path, (1080, 720)).into_drawing_area();
        root.fill(&Self::CHART_COLOR)?;

        let mut chart = ChartBuilder::on(&root)
            .x_label_area_size(72)
            .y_label_area_size(96)
            .margin(20)
            .caption(caption, ("sans-serif", 40.))
            .build_cartesian_2d(0..daily.rows.len(), *mwh_min..(*mwh_max * 1.05))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .bold_line_style(WHITE.mix(0.3))
            .y_desc("MWh")
            .x_desc("Date")
            .axis_desc_style(("sans-serif", 30))
            .x_label_formatter(&|&idx| {
                daily
                    .rows
                    .get(idx)
                    .map(|row| row.date.to_string())
                    .unwrap_or_default()
            })
            .x_labels(12)
            .y_labels(10)
            .x_label_style(("sans-serif", 14))
            .y_label_style(("sans-serif", 16))
            .draw()?;

        for (series_idx, label) in daily.series.iter().enumerate() {
            let color = Palette99::pick(series_idx).to_rgba();
            chart
                .draw_series(LineSeries::new(
                    daily.rows.iter().enumerate().filter_map(|(day_idx, row)| {
                        row.values[series_idx].map(|mwh| (day_idx, mwh))
                    }),
                    color.stroke_width(2),
                ))?
                .label(label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .label_font(("sans-serif", 14))
            .draw()?;

        root.present()?;

        Ok(())
    }
}
