//! Diagnostic plots comparing samples before and after normalization

mod plot;

use std::path::{Path, PathBuf};

use crate::data::MeasurementTable;
use crate::error::Result;
use crate::stats::quartiles;

pub use plot::{draw_boxplots, draw_density};

/// File name of the box plot image
pub const BOXPLOT_FILE: &str = "Boxplot_Quantile_Normalization.png";
/// File name of the density plot image
pub const DENSITY_FILE: &str = "Density_plot_Quantile_Normalization.png";

/// Lower plot limit used when a column has no negative values
pub const LOWER_LIMIT_FLOOR: f64 = -50.0;

/// Which plots to draw and where
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Box plot of every sample, before and after
    pub boxplot: bool,
    /// Kernel density curve of every sample, before and after
    pub density: bool,
    /// Directory the images are written to
    pub output_dir: PathBuf,
    /// IQR multiplier for the y-axis limits of the box plot
    pub whisker: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            boxplot: true,
            density: false,
            output_dir: PathBuf::from("."),
            whisker: 1.6,
        }
    }
}

impl PlotConfig {
    /// No plots at all
    pub fn disabled() -> Self {
        Self {
            boxplot: false,
            density: false,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.boxplot || self.density
    }

    pub fn boxplot_path(&self) -> PathBuf {
        self.output_dir.join(BOXPLOT_FILE)
    }

    pub fn density_path(&self) -> PathBuf {
        self.output_dir.join(DENSITY_FILE)
    }
}

/// Y-axis limits that fit every sample's whiskers.
///
/// Per column the upper whisker is `Q3 + whisker * IQR`. The lower whisker is
/// `Q1 - whisker * IQR` when the column has negative values, otherwise the
/// fixed [`LOWER_LIMIT_FLOOR`]. Returns the lowest lower and highest upper
/// whisker over all columns.
pub fn plot_limits(table: &MeasurementTable, whisker: f64) -> (f64, f64) {
    let mut lower = f64::INFINITY;
    let mut upper = f64::NEG_INFINITY;

    for j in 0..table.n_samples() {
        let column = table.sample_values(j).to_vec();
        if column.is_empty() {
            continue;
        }
        let (q1, q3) = quartiles(&column);
        let iqr = q3 - q1;
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);

        upper = upper.max(q3 + whisker * iqr);
        if min < 0.0 {
            lower = lower.min(q1 - whisker * iqr);
        } else {
            lower = lower.min(LOWER_LIMIT_FLOOR);
        }
    }

    (lower, upper)
}

/// Evaluation grid for density curves: the data range extended by half its
/// width on both sides
pub(crate) fn density_range(tables: &[&MeasurementTable]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for table in tables {
        for &v in table.values().iter() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let span = if hi > lo { hi - lo } else { 1.0 };
    (lo - 0.5 * span, hi + 0.5 * span)
}

/// Draw every plot enabled in `config`; returns the paths written
pub fn render_plots(
    before: &MeasurementTable,
    after: &MeasurementTable,
    config: &PlotConfig,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if !config.is_enabled() {
        return Ok(written);
    }
    ensure_dir(&config.output_dir)?;

    if config.density {
        let path = config.density_path();
        log::info!("Drawing density plot: {}", path.display());
        draw_density(before, after, &path)?;
        written.push(path);
    }

    if config.boxplot {
        let path = config.boxplot_path();
        log::info!("Drawing box plot: {}", path.display());
        draw_boxplots(before, after, config.whisker, &path)?;
        written.push(path);
    }

    Ok(written)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
