//! Run summary written after normalization

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stats::ColumnStats;

/// Per-sample record of one normalization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSummary {
    pub sample_id: String,
    /// Input file the sample was read from
    pub input: PathBuf,
    /// Output file the normalized track was written to
    pub output: PathBuf,
    /// Distribution of the raw measurements
    pub raw: ColumnStats,
    /// Distribution after normalization
    pub normalized: ColumnStats,
}

/// Summary of a complete normalization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub n_loci: usize,
    pub n_samples: usize,
    pub samples: Vec<SampleSummary>,
    /// Distribution of the rank-mean profile every sample was mapped onto
    pub profile: ColumnStats,
    /// Plot images written during the run
    #[serde(default)]
    pub plots: Vec<PathBuf>,
}

/// Write a run summary as pretty-printed JSON
pub fn write_summary<P: AsRef<Path>>(path: P, summary: &RunSummary) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Read a run summary written by [`write_summary`]
pub fn read_summary<P: AsRef<Path>>(path: P) -> Result<RunSummary> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::summarize;
    use tempfile::tempdir;

    fn sample(id: &str, raw: &[f64], normalized: &[f64]) -> SampleSummary {
        SampleSummary {
            sample_id: id.to_string(),
            input: PathBuf::from(format!("{}.bg", id)),
            output: PathBuf::from(format!("{}_normalised.tabular", id)),
            raw: summarize(raw).unwrap(),
            normalized: summarize(normalized).unwrap(),
        }
    }

    #[test]
    fn test_summary_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = RunSummary {
            n_loci: 3,
            n_samples: 2,
            samples: vec![
                sample("a", &[1.0, 1.0, 3.0], &[1.5, 1.5, 4.5]),
                sample("b", &[2.0, 4.0, 6.0], &[1.5, 2.5, 4.5]),
            ],
            profile: summarize(&[1.5, 2.5, 4.5]).unwrap(),
            plots: vec![],
        };

        write_summary(&path, &summary).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"sample_id\": \"a\""));

        let loaded = read_summary(&path).unwrap();
        assert_eq!(loaded.n_samples, 2);
        assert_eq!(loaded.samples[1].normalized, summary.samples[1].normalized);
    }
}
