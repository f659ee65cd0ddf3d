//! Reading and writing tab-separated signal tracks (bedGraph layout)
//!
//! Each data row is `chrom  start  stop  value [extra...]`. Extra columns are
//! ignored on input; output rows carry exactly the four columns.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::data::{Locus, SampleTrack};
use crate::error::{QnormError, Result};

/// Default suffix appended to the input stem for output files
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_normalised.tabular";

/// Header lines a bedGraph file may start with
fn is_header_record(record: &StringRecord) -> bool {
    let keyword = record.get(0).and_then(|first| first.split_whitespace().next());
    matches!(keyword, Some("track") | Some("browser"))
}

/// Sample identifier for an input path: the file name without its last extension
pub fn sample_id_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Output path for an input: stem + `suffix`, next to the input or in `out_dir`
pub fn output_path_for(input: &Path, suffix: &str, out_dir: Option<&Path>) -> PathBuf {
    let file_name = format!("{}{}", sample_id_for(input), suffix);
    match out_dir.or_else(|| input.parent()) {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn parse_coordinate(field: &str, what: &str, location: &str) -> Result<u64> {
    field.trim().parse::<u64>().map_err(|_| QnormError::InvalidValue {
        location: location.to_string(),
        reason: format!("{} position '{}' is not a non-negative integer", what, field),
    })
}

fn parse_measurement(field: &str, location: &str) -> Result<f64> {
    let value = field
        .trim()
        .parse::<f64>()
        .map_err(|_| QnormError::InvalidValue {
            location: location.to_string(),
            reason: format!("measurement '{}' is not numeric", field),
        })?;
    if !value.is_finite() {
        return Err(QnormError::InvalidValue {
            location: location.to_string(),
            reason: format!("measurement '{}' is not finite", field),
        });
    }
    Ok(value)
}

/// Read one sample's track from a tab-separated file
pub fn read_sample_track<P: AsRef<Path>>(path: P) -> Result<SampleTrack> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_path(path)?;

    let mut loci = Vec::new();
    let mut values = Vec::new();

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(idx as u64 + 1);
        let location = format!("{}:{}", path.display(), line);

        if record.iter().all(|f| f.trim().is_empty()) || is_header_record(&record) {
            continue;
        }

        if record.len() < 4 {
            return Err(QnormError::InvalidValue {
                location,
                reason: format!("expected at least 4 tab-separated fields, found {}", record.len()),
            });
        }

        let start = parse_coordinate(&record[1], "start", &location)?;
        let stop = parse_coordinate(&record[2], "stop", &location)?;
        let value = parse_measurement(&record[3], &location)?;

        loci.push(Locus::new(record[0].trim(), start, stop));
        values.push(value);
    }

    if values.is_empty() {
        return Err(QnormError::EmptyData {
            reason: format!("No data rows found in {}", path.display()),
        });
    }

    SampleTrack::new(sample_id_for(path), path, loci, values)
}

/// Render a measurement the way it is written to output files.
///
/// Shortest representation that round-trips, always with a decimal point.
pub fn format_value(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') || !value.is_finite() {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Write loci joined with their normalized values; no header, `\n` line ends
pub fn write_normalized_track<P: AsRef<Path>>(path: P, loci: &[Locus], values: &[f64]) -> Result<()> {
    if loci.len() != values.len() {
        return Err(QnormError::DimensionMismatch {
            expected: format!("{} values", loci.len()),
            got: format!("{} values", values.len()),
        });
    }

    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)?;

    for (locus, &value) in loci.iter().zip(values.iter()) {
        let start = locus.start.to_string();
        let stop = locus.stop.to_string();
        let value = format_value(value);
        writer.write_record([locus.chrom.as_str(), start.as_str(), stop.as_str(), value.as_str()])?;
    }
    writer.flush()?;

    Ok(())
}
