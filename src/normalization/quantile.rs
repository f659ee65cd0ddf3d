//! Quantile normalization
//!
//! Every sample is mapped onto one shared target distribution, the
//! rank-mean profile: the k-th entry is the mean over samples of each
//! sample's k-th smallest value. A value is replaced by the profile entry at
//! its minimum rank within its own sample, so tied values share the lowest
//! rank of their tie group and all map to the same output.

use std::cmp::Ordering;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::data::{validate_finite, MeasurementTable};
use crate::error::{QnormError, Result};

/// Compute 1-based minimum ranks of a column.
///
/// Equal values all receive the smallest position the group occupies in the
/// ascending order, e.g. `[3, 1, 1, 2]` ranks as `[4, 1, 1, 3]`. Ranks lie in
/// `[1, len]` and may repeat or skip.
pub fn min_ranks(column: ArrayView1<f64>) -> Vec<usize> {
    let n = column.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        column[a]
            .partial_cmp(&column[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut ranks = vec![0usize; n];
    let mut group_rank = 1;
    for (pos, &idx) in order.iter().enumerate() {
        if pos > 0 && column[idx] != column[order[pos - 1]] {
            group_rank = pos + 1;
        }
        ranks[idx] = group_rank;
    }
    ranks
}

/// Sort each column ascending, independently
fn sort_columns(values: ArrayView2<f64>) -> Array2<f64> {
    let mut sorted = values.to_owned();
    for mut column in sorted.axis_iter_mut(Axis(1)) {
        let mut col: Vec<f64> = column.to_vec();
        col.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        column.assign(&Array1::from(col));
    }
    sorted
}

/// The target distribution shared by all normalized samples.
///
/// Indexed by rank in `1..=n_loci`; every rank is populated regardless of
/// which ranks a given sample actually uses.
#[derive(Debug, Clone, PartialEq)]
pub struct RankMeanProfile {
    means: Array1<f64>,
}

impl RankMeanProfile {
    /// Build the profile from a loci x samples matrix
    pub fn from_values(values: ArrayView2<f64>) -> Result<Self> {
        let (n_loci, n_samples) = values.dim();
        if n_loci == 0 || n_samples == 0 {
            return Err(QnormError::EmptyData {
                reason: "Cannot build a rank-mean profile from an empty table".to_string(),
            });
        }

        let sorted = sort_columns(values);
        let means = sorted
            .mean_axis(Axis(1))
            .ok_or_else(|| QnormError::EmptyData {
                reason: "No samples to average".to_string(),
            })?;

        Ok(Self { means })
    }

    /// Build the profile from a measurement table
    pub fn from_table(table: &MeasurementTable) -> Result<Self> {
        Self::from_values(table.values())
    }

    /// Profile value for a 1-based rank
    pub fn value_at_rank(&self, rank: usize) -> Result<f64> {
        if rank == 0 || rank > self.means.len() {
            return Err(QnormError::InvalidInput {
                reason: format!("Rank {} outside 1..={}", rank, self.means.len()),
            });
        }
        Ok(self.means[rank - 1])
    }

    /// Profile values in ascending rank order
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.means.view()
    }
}

/// Result of quantile normalization
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    table: MeasurementTable,
    profile: RankMeanProfile,
}

impl NormalizedTable {
    /// Normalized measurements, same shape and sample order as the input
    pub fn table(&self) -> &MeasurementTable {
        &self.table
    }

    /// The target distribution the samples were mapped onto
    pub fn profile(&self) -> &RankMeanProfile {
        &self.profile
    }
}

/// At least one locus and two samples
fn check_dims(values: ArrayView2<f64>) -> Result<()> {
    let (n_loci, n_samples) = values.dim();
    if n_loci == 0 {
        return Err(QnormError::EmptyData {
            reason: "Measurement table has no loci".to_string(),
        });
    }
    if n_samples < 2 {
        return Err(QnormError::InvalidInput {
            reason: format!(
                "Quantile normalization needs at least 2 samples, got {}",
                n_samples
            ),
        });
    }
    Ok(())
}

/// Replace every value by the profile entry at its column-local minimum rank
fn substitute_ranks(values: ArrayView2<f64>, profile: &RankMeanProfile) -> Result<Array2<f64>> {
    let mut normalized = Array2::zeros(values.dim());
    for (j, column) in values.axis_iter(Axis(1)).enumerate() {
        for (i, rank) in min_ranks(column).into_iter().enumerate() {
            normalized[[i, j]] = profile.value_at_rank(rank)?;
        }
    }
    Ok(normalized)
}

/// Quantile normalize a loci x samples matrix.
///
/// Returns a new matrix of the same shape; the input is left untouched.
/// Requires at least one locus, at least two samples and finite values;
/// a bad cell is reported by column and row.
pub fn quantile_normalize_values(values: ArrayView2<f64>) -> Result<(Array2<f64>, RankMeanProfile)> {
    check_dims(values)?;
    validate_finite(values, &[])?;

    let profile = RankMeanProfile::from_values(values)?;
    let normalized = substitute_ranks(values, &profile)?;

    Ok((normalized, profile))
}

/// Quantile normalize a measurement table
pub fn quantile_normalize(table: &MeasurementTable) -> Result<NormalizedTable> {
    check_dims(table.values())?;
    validate_finite(table.values(), table.sample_ids())?;

    log::debug!(
        "Quantile normalizing {} loci across {} samples",
        table.n_loci(),
        table.n_samples()
    );
    let profile = RankMeanProfile::from_table(table)?;
    let values = substitute_ranks(table.values(), &profile)?;
    let table = MeasurementTable::new(values, table.sample_ids().to_vec())?;

    Ok(NormalizedTable { table, profile })
}
