use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{density_range, plot_limits};
use crate::data::MeasurementTable;
use crate::error::{QnormError, Result};
use crate::stats::{gaussian_kde, linspace};

const IMAGE_SIZE: (u32, u32) = (1920, 720);
const DENSITY_POINTS: usize = 1000;

fn plot_err<E: std::fmt::Display>(e: E) -> QnormError {
    QnormError::Plot {
        reason: e.to_string(),
    }
}

fn sample_label(value: &SegmentValue<&String>) -> String {
    match value {
        SegmentValue::Exact(id) | SegmentValue::CenterOf(id) => id.to_string(),
        SegmentValue::Last => String::new(),
    }
}

fn boxplot_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    table: &MeasurementTable,
    title: &str,
    whisker: f64,
) -> Result<()> {
    let sample_ids = table.sample_ids().to_vec();
    let (lo, hi) = plot_limits(table, whisker);
    let hi = if hi > lo { hi } else { lo + 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(sample_ids[..].into_segmented(), lo as f32..hi as f32)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Samples")
        .y_desc("Measurement")
        .x_label_formatter(&sample_label)
        .light_line_style(&WHITE)
        .draw()
        .map_err(plot_err)?;

    let quartiles: Vec<Quartiles> = (0..table.n_samples())
        .map(|j| Quartiles::new(&table.sample_values(j).to_vec()))
        .collect();

    chart
        .draw_series(sample_ids.iter().zip(quartiles.iter()).enumerate().map(|(j, (id, q))| {
            Boxplot::new_vertical(SegmentValue::CenterOf(id), q)
                .width(30)
                .style(Palette99::pick(j).stroke_width(2))
        }))
        .map_err(plot_err)?;

    Ok(())
}

/// Side-by-side box plots of the raw and normalized samples
pub fn draw_boxplots(
    before: &MeasurementTable,
    after: &MeasurementTable,
    whisker: f64,
    path: &Path,
) -> Result<()> {
    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let areas = root.split_evenly((1, 2));

    boxplot_panel(
        &areas[0],
        before,
        "Boxplot of raw data before Quantile Normalization",
        whisker,
    )?;
    boxplot_panel(
        &areas[1],
        after,
        "Boxplot after Quantile Normalization",
        whisker,
    )?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn density_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    table: &MeasurementTable,
    title: &str,
) -> Result<()> {
    let (lo, hi) = density_range(&[table]);
    let grid = linspace(lo, hi, DENSITY_POINTS);

    let mut curves = Vec::with_capacity(table.n_samples());
    for j in 0..table.n_samples() {
        curves.push(gaussian_kde(&table.sample_values(j).to_vec(), &grid)?);
    }
    let y_max = curves
        .iter()
        .flat_map(|c| c.iter().copied())
        .fold(0.0f64, f64::max)
        * 1.05;
    let y_max = if y_max > 0.0 { y_max } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(lo..hi, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Measurement")
        .y_desc("Density")
        .draw()
        .map_err(plot_err)?;

    for (j, (id, curve)) in table.sample_ids().iter().zip(curves.iter()).enumerate() {
        chart
            .draw_series(LineSeries::new(
                grid.iter().copied().zip(curve.iter().copied()),
                Palette99::pick(j).stroke_width(3),
            ))
            .map_err(plot_err)?
            .label(id.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], Palette99::pick(j).stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

/// Side-by-side kernel density curves of the raw and normalized samples
pub fn draw_density(before: &MeasurementTable, after: &MeasurementTable, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let areas = root.split_evenly((1, 2));

    density_panel(&areas[0], before, "Density plot before Quantile Normalization")?;
    density_panel(&areas[1], after, "Density plot after Quantile Normalization")?;

    root.present().map_err(plot_err)?;
    Ok(())
}
