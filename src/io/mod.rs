//! Input/Output operations for signal tracks and run summaries

mod bedgraph;
mod summary;

pub use bedgraph::{
    format_value, output_path_for, read_sample_track, sample_id_for, write_normalized_track,
    DEFAULT_OUTPUT_SUFFIX,
};
pub use summary::{read_summary, write_summary, RunSummary, SampleSummary};
