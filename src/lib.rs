//! rust_qnorm: quantile normalization of genomic signal tracks
//!
//! Brings the value distributions of several samples measured over the same
//! loci (e.g. ChIP-Seq coverage in bedGraph form) onto one shared target
//! distribution while keeping each sample's rank order.
//!
//! # Example
//!
//! ```ignore
//! use rust_qnorm::prelude::*;
//!
//! let tracks = vec![read_sample_track("a.bedgraph")?, read_sample_track("b.bedgraph")?];
//! let table = assemble_tracks(&tracks)?;
//! let normalized = quantile_normalize(&table)?;
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod io;
pub mod normalization;
pub mod pipeline;
pub mod stats;
pub mod visualize;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{assemble_tracks, Locus, MeasurementTable, SampleTrack};
    pub use crate::error::{QnormError, Result};
    pub use crate::io::{
        output_path_for, read_sample_track, write_normalized_track, write_summary, RunSummary,
        SampleSummary,
    };
    pub use crate::normalization::{min_ranks, quantile_normalize, NormalizedTable, RankMeanProfile};
    pub use crate::pipeline::{run, RunConfig};
    pub use crate::visualize::{plot_limits, render_plots, PlotConfig};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_tracks_to_normalized_values() {
        let loci = vec![
            Locus::new("chr1", 0, 100),
            Locus::new("chr1", 100, 200),
            Locus::new("chr1", 200, 300),
        ];
        let tracks = vec![
            SampleTrack::new("a", "a.bg", loci.clone(), vec![1.0, 1.0, 3.0]).unwrap(),
            SampleTrack::new("b", "b.bg", loci, vec![2.0, 4.0, 6.0]).unwrap(),
        ];

        let table = assemble_tracks(&tracks).unwrap();
        let normalized = quantile_normalize(&table).unwrap();

        let a = normalized.table().sample_values(0).to_vec();
        let b = normalized.table().sample_values(1).to_vec();
        for (got, want) in a.iter().zip([1.5, 1.5, 4.5]) {
            assert!((got - want).abs() < 1e-12, "sample a: {:?}", a);
        }
        for (got, want) in b.iter().zip([1.5, 2.5, 4.5]) {
            assert!((got - want).abs() < 1e-12, "sample b: {:?}", b);
        }
    }
}
