//! Data structures for signal tracks and measurement tables

mod measurement_table;
mod track;

pub use measurement_table::MeasurementTable;
pub(crate) use measurement_table::validate_finite;
pub use track::{assemble_tracks, Locus, SampleTrack};
