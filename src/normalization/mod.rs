//! Normalization of measurement tables across samples

mod quantile;

pub use quantile::{
    min_ranks, quantile_normalize, quantile_normalize_values, NormalizedTable, RankMeanProfile,
};
