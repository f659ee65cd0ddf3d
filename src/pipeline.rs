//! End-to-end normalization run: load, normalize, plot, write

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::data::{assemble_tracks, MeasurementTable, SampleTrack};
use crate::error::{QnormError, Result};
use crate::io::{
    output_path_for, read_sample_track, write_normalized_track, write_summary, RunSummary,
    SampleSummary, DEFAULT_OUTPUT_SUFFIX,
};
use crate::normalization::quantile_normalize;
use crate::stats::{summarize, ColumnStats};
use crate::visualize::{render_plots, PlotConfig};

/// Everything a run needs to know
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// One input file per sample
    pub inputs: Vec<PathBuf>,
    /// Appended to each input stem to name its output file
    pub suffix: String,
    /// Output directory; `None` writes next to each input
    pub out_dir: Option<PathBuf>,
    pub plots: PlotConfig,
    /// Optional JSON summary path
    pub summary: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            out_dir: None,
            plots: PlotConfig::default(),
            summary: None,
        }
    }
}

impl RunConfig {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            ..Self::default()
        }
    }
}

fn column_stats(table: &MeasurementTable, sample_idx: usize) -> Result<ColumnStats> {
    summarize(&table.sample_values(sample_idx).to_vec()).ok_or_else(|| QnormError::EmptyData {
        reason: format!("Sample '{}' has no values", table.sample_ids()[sample_idx]),
    })
}

/// Best-effort absolute form of a path that may not exist yet
fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(p) = path.canonicalize() {
        return p;
    }
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// Output path for every input, rejecting any set where two outputs coincide
/// or an output lands on one of the inputs
fn plan_outputs(config: &RunConfig) -> Result<Vec<PathBuf>> {
    let outputs: Vec<PathBuf> = config
        .inputs
        .iter()
        .map(|input| output_path_for(input, &config.suffix, config.out_dir.as_deref()))
        .collect();

    let inputs_resolved: Vec<PathBuf> = config.inputs.iter().map(|p| resolve_path(p)).collect();
    let outputs_resolved: Vec<PathBuf> = outputs.iter().map(|p| resolve_path(p)).collect();

    for (i, out) in outputs_resolved.iter().enumerate() {
        if let Some(k) = inputs_resolved.iter().position(|input| input == out) {
            return Err(QnormError::InvalidInput {
                reason: format!(
                    "Output {} for {} would overwrite the input {}",
                    outputs[i].display(),
                    config.inputs[i].display(),
                    config.inputs[k].display()
                ),
            });
        }
        if let Some(k) = outputs_resolved[..i].iter().position(|earlier| earlier == out) {
            return Err(QnormError::InvalidInput {
                reason: format!(
                    "Inputs {} and {} would both be written to {}",
                    config.inputs[k].display(),
                    config.inputs[i].display(),
                    outputs[i].display()
                ),
            });
        }
    }

    if let Some(summary) = &config.summary {
        let summary_resolved = resolve_path(summary);
        if let Some(k) = inputs_resolved.iter().position(|input| *input == summary_resolved) {
            return Err(QnormError::InvalidInput {
                reason: format!(
                    "Summary {} would overwrite the input {}",
                    summary.display(),
                    config.inputs[k].display()
                ),
            });
        }
    }

    Ok(outputs)
}

/// Run quantile normalization over the configured input files.
///
/// All inputs are read and validated and the normalization completes before
/// the first output is written, so a bad input never leaves partial output.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    if config.inputs.len() < 2 {
        return Err(QnormError::InvalidInput {
            reason: format!(
                "At least 2 input files are required, got {}",
                config.inputs.len()
            ),
        });
    }
    let outputs = plan_outputs(config)?;

    let mut tracks: Vec<SampleTrack> = Vec::with_capacity(config.inputs.len());
    for path in &config.inputs {
        info!("Loading track from: {}", path.display());
        let track = read_sample_track(path)?;
        debug!("  {} loci", track.len());
        tracks.push(track);
    }

    let raw = assemble_tracks(&tracks)?;
    info!("  {} loci, {} samples", raw.n_loci(), raw.n_samples());

    info!("Quantile normalizing...");
    let normalized = quantile_normalize(&raw)?;
    let profile = summarize(&normalized.profile().values().to_vec()).ok_or_else(|| {
        QnormError::EmptyData {
            reason: "Rank-mean profile is empty".to_string(),
        }
    })?;
    debug!(
        "Rank-mean profile: min {:.4}, median {:.4}, max {:.4}",
        profile.min, profile.median, profile.max
    );

    let plots = render_plots(&raw, normalized.table(), &config.plots)?;

    if let Some(dir) = &config.out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut samples = Vec::with_capacity(tracks.len());
    for (j, (track, output)) in tracks.iter().zip(outputs).enumerate() {
        let values = normalized.table().sample_values(j).to_vec();
        info!("Writing normalized track to: {}", output.display());
        write_normalized_track(&output, track.loci(), &values)?;

        samples.push(SampleSummary {
            sample_id: normalized.table().sample_ids()[j].clone(),
            input: track.source().to_path_buf(),
            output,
            raw: column_stats(&raw, j)?,
            normalized: column_stats(normalized.table(), j)?,
        });
    }

    let summary = RunSummary {
        n_loci: raw.n_loci(),
        n_samples: raw.n_samples(),
        samples,
        profile,
        plots,
    };

    if let Some(path) = &config.summary {
        info!("Writing run summary to: {}", path.display());
        write_summary(path, &summary)?;
    }

    info!("Done!");
    Ok(summary)
}
