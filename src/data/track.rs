//! Genomic loci and per-sample signal tracks

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::MeasurementTable;
use crate::error::{QnormError, Result};

/// A genomic interval shared by the same row of every sample
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locus {
    pub chrom: String,
    pub start: u64,
    pub stop: u64,
}

impl Locus {
    pub fn new(chrom: impl Into<String>, start: u64, stop: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            stop,
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.stop)
    }
}

/// One loaded input file: its loci and the measurement at each locus
#[derive(Debug, Clone)]
pub struct SampleTrack {
    sample_id: String,
    source: PathBuf,
    loci: Vec<Locus>,
    values: Vec<f64>,
}

impl SampleTrack {
    pub fn new(
        sample_id: impl Into<String>,
        source: impl Into<PathBuf>,
        loci: Vec<Locus>,
        values: Vec<f64>,
    ) -> Result<Self> {
        let sample_id = sample_id.into();
        if loci.len() != values.len() {
            return Err(QnormError::DimensionMismatch {
                expected: format!("{} values for sample '{}'", loci.len(), sample_id),
                got: format!("{} values", values.len()),
            });
        }

        Ok(Self {
            sample_id,
            source: source.into(),
            loci,
            values,
        })
    }

    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn loci(&self) -> &[Locus] {
        &self.loci
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Combine loaded tracks into a single measurement table.
///
/// Row counts must agree with the first track; the first track that deviates
/// fails with [`QnormError::ShapeMismatch`] naming its source file. Loci that
/// differ at the same row are only reported as a warning, since inputs are
/// expected to be pre-aligned.
pub fn assemble_tracks(tracks: &[SampleTrack]) -> Result<MeasurementTable> {
    let first = tracks.first().ok_or_else(|| QnormError::EmptyData {
        reason: "No sample tracks to assemble".to_string(),
    })?;

    for track in &tracks[1..] {
        if track.len() != first.len() {
            return Err(QnormError::ShapeMismatch {
                sample: track.source().display().to_string(),
                expected: first.len(),
                got: track.len(),
            });
        }

        if let Some(row) = track
            .loci()
            .iter()
            .zip(first.loci())
            .position(|(a, b)| a != b)
        {
            log::warn!(
                "Loci of '{}' differ from '{}' starting at row {} ({} vs {})",
                track.source().display(),
                first.source().display(),
                row + 1,
                track.loci()[row],
                first.loci()[row]
            );
        }
    }

    let sample_ids = tracks.iter().map(|t| t.sample_id().to_string()).collect();
    let columns = tracks.iter().map(|t| t.values().to_vec()).collect();
    MeasurementTable::from_columns(sample_ids, columns)
}
