//! Command-line interface for rust_qnorm

use std::path::PathBuf;

use clap::Parser;

use crate::io::DEFAULT_OUTPUT_SUFFIX;
use crate::pipeline::RunConfig;
use crate::visualize::PlotConfig;

#[derive(Parser, Debug)]
#[command(name = "rust_qnorm")]
#[command(version)]
#[command(about = "Quantile normalization of bedGraph signal tracks")]
#[command(
    long_about = "Quantile normalization of bedGraph signal tracks.\n\n\
        Reads two or more tab-separated files (chrom, start, stop, value) covering\n\
        the same loci in the same order, maps every sample onto the mean\n\
        distribution of all samples, and writes one normalized file per input.",
    after_long_help = "\
Examples:
  # Normalize three tracks, outputs land next to the inputs
  rust_qnorm a.bedgraph b.bedgraph c.bedgraph

  # Write outputs and plots elsewhere, with density curves and a JSON summary
  rust_qnorm *.bedgraph --out-dir normalized --plot-dir plots --density \\
    --summary normalized/summary.json"
)]
pub struct Cli {
    /// Input files, one per sample (at least two)
    #[arg(required = true, num_args = 2.., value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Suffix appended to each input's stem to name its output
    #[arg(long, default_value = DEFAULT_OUTPUT_SUFFIX)]
    pub suffix: String,

    /// Directory for normalized files [default: next to each input]
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Skip the before/after box plot
    #[arg(long)]
    pub no_boxplot: bool,

    /// Draw before/after density curves
    #[arg(long)]
    pub density: bool,

    /// Directory for plot images
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub plot_dir: PathBuf,

    /// IQR multiplier for the box plot y-axis limits
    #[arg(long, default_value = "1.6")]
    pub whisker: f64,

    /// Write a JSON run summary to this path
    #[arg(long, value_name = "JSON")]
    pub summary: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the library configuration from parsed arguments
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            inputs: self.inputs.clone(),
            suffix: self.suffix.clone(),
            out_dir: self.out_dir.clone(),
            plots: PlotConfig {
                boxplot: !self.no_boxplot,
                density: self.density,
                output_dir: self.plot_dir.clone(),
                whisker: self.whisker,
            },
            summary: self.summary.clone(),
        }
    }
}
