//! Loci x samples measurement matrix

use std::collections::HashMap;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{QnormError, Result};

/// Deduplicate sample names by appending _1, _2, etc. to repeats
fn deduplicate_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for name in &names {
        *seen.entry(name.clone()).or_insert(0) += 1;
    }
    if !seen.values().any(|&c| c > 1) {
        return names;
    }

    seen.clear();
    let mut result = Vec::with_capacity(names.len());
    for name in names {
        let count = seen.entry(name.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            result.push(name);
        } else {
            let new_name = format!("{}_{}", name, *count - 1);
            log::warn!("Duplicate sample name '{}' renamed to '{}'", name, new_name);
            result.push(new_name);
        }
    }
    result
}

/// Check that every cell is a finite number
pub(crate) fn validate_finite(values: ArrayView2<f64>, sample_ids: &[String]) -> Result<()> {
    for (j, column) in values.axis_iter(Axis(1)).enumerate() {
        if let Some(i) = column.iter().position(|x| !x.is_finite()) {
            let location = match sample_ids.get(j) {
                Some(id) => format!("sample '{}', row {}", id, i + 1),
                None => format!("column {}, row {}", j + 1, i + 1),
            };
            return Err(QnormError::InvalidValue {
                location,
                reason: format!("measurement must be finite, got {}", column[i]),
            });
        }
    }
    Ok(())
}

/// Signal measurements for a set of samples sharing the same loci.
///
/// Rows are loci, columns are samples. Only numeric data lives here; locus
/// coordinates stay with the [`SampleTrack`](super::SampleTrack) they were
/// read from.
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    values: Array2<f64>,
    sample_ids: Vec<String>,
}

impl MeasurementTable {
    /// Create a table from a loci x samples matrix
    pub fn new(values: Array2<f64>, sample_ids: Vec<String>) -> Result<Self> {
        let n_samples = values.ncols();
        if sample_ids.len() != n_samples {
            return Err(QnormError::DimensionMismatch {
                expected: format!("{} sample IDs", n_samples),
                got: format!("{} sample IDs", sample_ids.len()),
            });
        }

        validate_finite(values.view(), &sample_ids)?;

        Ok(Self {
            values,
            sample_ids: deduplicate_names(sample_ids),
        })
    }

    /// Create a table from one value vector per sample.
    ///
    /// Every column must have the length of the first one; the first column
    /// that differs is reported as a [`QnormError::ShapeMismatch`].
    pub fn from_columns(sample_ids: Vec<String>, columns: Vec<Vec<f64>>) -> Result<Self> {
        if sample_ids.len() != columns.len() {
            return Err(QnormError::DimensionMismatch {
                expected: format!("{} sample IDs", columns.len()),
                got: format!("{} sample IDs", sample_ids.len()),
            });
        }

        let n_loci = columns.first().map(Vec::len).unwrap_or(0);
        for (sample_id, column) in sample_ids.iter().zip(columns.iter()) {
            if column.len() != n_loci {
                return Err(QnormError::ShapeMismatch {
                    sample: sample_id.clone(),
                    expected: n_loci,
                    got: column.len(),
                });
            }
        }

        let mut values = Array2::zeros((n_loci, columns.len()));
        for (j, column) in columns.iter().enumerate() {
            for (i, &v) in column.iter().enumerate() {
                values[[i, j]] = v;
            }
        }

        Self::new(values, sample_ids)
    }

    /// Number of loci (rows)
    pub fn n_loci(&self) -> usize {
        self.values.nrows()
    }

    /// Number of samples (columns)
    pub fn n_samples(&self) -> usize {
        self.values.ncols()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Measurements of one sample
    pub fn sample_values(&self, sample_idx: usize) -> ArrayView1<'_, f64> {
        self.values.column(sample_idx)
    }

    /// Measurements at one locus across samples
    pub fn locus_values(&self, locus_idx: usize) -> ArrayView1<'_, f64> {
        self.values.row(locus_idx)
    }
}
