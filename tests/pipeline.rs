use std::fs;
use std::path::{Path, PathBuf};

use rust_qnorm::prelude::*;
use tempfile::tempdir;

fn write_track(dir: &Path, name: &str, values: &[f64]) -> PathBuf {
    let path = dir.join(name);
    let body: String = values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("chr1\t{}\t{}\t{}\n", i * 50, (i + 1) * 50, v))
        .collect();
    fs::write(&path, body).unwrap();
    path
}

fn read_values(path: &Path) -> Vec<f64> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split('\t').nth(3).unwrap().parse().unwrap())
        .collect()
}

fn config(inputs: Vec<PathBuf>) -> RunConfig {
    RunConfig {
        plots: PlotConfig::disabled(),
        ..RunConfig::new(inputs)
    }
}

#[test]
fn test_run_writes_one_output_per_input() {
    let dir = tempdir().unwrap();
    let a = write_track(dir.path(), "a.bedgraph", &[1.0, 2.0, 3.0, 4.0]);
    let b = write_track(dir.path(), "b.bedgraph", &[5.0, 6.0, 7.0, 8.0]);

    let summary = run(&config(vec![a, b])).unwrap();
    assert_eq!(summary.n_loci, 4);
    assert_eq!(summary.n_samples, 2);

    for name in ["a_normalised.tabular", "b_normalised.tabular"] {
        let out = dir.path().join(name);
        assert_eq!(read_values(&out), vec![3.0, 4.0, 5.0, 6.0]);
    }

    let content = fs::read_to_string(dir.path().join("a_normalised.tabular")).unwrap();
    assert_eq!(content.lines().next(), Some("chr1\t0\t50\t3.0"));
    assert!(content.ends_with('\n'));
}

#[test]
fn test_run_with_ties_and_summary() {
    let dir = tempdir().unwrap();
    let out_dir = dir.path().join("normalized");
    let a = write_track(dir.path(), "a.bg", &[1.0, 1.0, 3.0]);
    let b = write_track(dir.path(), "b.bg", &[2.0, 4.0, 6.0]);
    let summary_path = out_dir.join("summary.json");

    let mut cfg = config(vec![a, b]);
    cfg.out_dir = Some(out_dir.clone());
    cfg.suffix = ".qn.bg".to_string();
    cfg.summary = Some(summary_path.clone());

    run(&cfg).unwrap();

    assert_eq!(read_values(&out_dir.join("a.qn.bg")), vec![1.5, 1.5, 4.5]);
    assert_eq!(read_values(&out_dir.join("b.qn.bg")), vec![1.5, 2.5, 4.5]);

    let summary = rust_qnorm::io::read_summary(&summary_path).unwrap();
    assert_eq!(summary.samples.len(), 2);
    assert_eq!(summary.samples[0].sample_id, "a");
    assert_eq!(summary.samples[0].raw.max, 3.0);
    assert_eq!(summary.profile.min, 1.5);
    assert_eq!(summary.profile.max, 4.5);
}

#[test]
fn test_row_count_mismatch_writes_nothing() {
    let dir = tempdir().unwrap();
    let a = write_track(dir.path(), "a.bg", &[1.0, 2.0, 3.0]);
    let b = write_track(dir.path(), "b.bg", &[1.0, 2.0]);

    match run(&config(vec![a, b])) {
        Err(QnormError::ShapeMismatch { sample, expected, got }) => {
            assert!(sample.ends_with("b.bg"), "unexpected sample {}", sample);
            assert_eq!(expected, 3);
            assert_eq!(got, 2);
        }
        other => panic!("expected ShapeMismatch, got {:?}", other),
    }

    assert!(!dir.path().join("a_normalised.tabular").exists());
    assert!(!dir.path().join("b_normalised.tabular").exists());
}

#[test]
fn test_invalid_value_names_file() {
    let dir = tempdir().unwrap();
    let a = write_track(dir.path(), "a.bg", &[1.0, 2.0]);
    let b = dir.path().join("b.bg");
    fs::write(&b, "chr1\t0\t50\t1\nchr1\t50\t100\tmissing\n").unwrap();

    match run(&config(vec![a, b])) {
        Err(QnormError::InvalidValue { location, .. }) => {
            assert!(location.contains("b.bg:2"), "unexpected location {}", location)
        }
        other => panic!("expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_single_input_rejected() {
    let dir = tempdir().unwrap();
    let a = write_track(dir.path(), "a.bg", &[1.0]);
    assert!(matches!(
        run(&config(vec![a])),
        Err(QnormError::InvalidInput { .. })
    ));
}

#[test]
fn test_output_would_overwrite_input() {
    let dir = tempdir().unwrap();
    let a = write_track(dir.path(), "a", &[1.0, 2.0]);
    let b = write_track(dir.path(), "b", &[3.0, 4.0]);

    let mut cfg = config(vec![a.clone(), b]);
    cfg.suffix = String::new();
    assert!(matches!(run(&cfg), Err(QnormError::InvalidInput { .. })));
    assert_eq!(fs::read_to_string(&a).unwrap(), "chr1\t0\t50\t1\nchr1\t50\t100\t2\n");
}

fn invalid_input_reason(result: Result<RunSummary>) -> String {
    match result {
        Err(QnormError::InvalidInput { reason }) => reason,
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_same_stem_inputs_rejected() {
    let dir = tempdir().unwrap();
    let bg = write_track(dir.path(), "s.bg", &[1.0, 2.0]);
    let txt = write_track(dir.path(), "s.txt", &[3.0, 4.0]);

    let reason = invalid_input_reason(run(&config(vec![bg, txt])));
    assert!(reason.contains("s.bg") && reason.contains("s.txt"), "{}", reason);
    assert!(!dir.path().join("s_normalised.tabular").exists());
}

#[test]
fn test_same_file_name_in_two_directories_rejected_with_out_dir() {
    let dir = tempdir().unwrap();
    let run1 = dir.path().join("run1");
    let run2 = dir.path().join("run2");
    fs::create_dir_all(&run1).unwrap();
    fs::create_dir_all(&run2).unwrap();
    let first = write_track(&run1, "s.bg", &[1.0, 2.0]);
    let second = write_track(&run2, "s.bg", &[3.0, 4.0]);
    let out_dir = dir.path().join("out");

    let mut cfg = config(vec![first, second]);
    cfg.out_dir = Some(out_dir.clone());

    let reason = invalid_input_reason(run(&cfg));
    assert!(reason.contains("run1") && reason.contains("run2"), "{}", reason);
    assert!(!out_dir.exists());
}

#[test]
fn test_output_landing_on_another_input_rejected() {
    let dir = tempdir().unwrap();
    let x = write_track(dir.path(), "x.bg", &[1.0, 2.0]);
    let other = write_track(dir.path(), "x_normalised.tabular", &[3.0, 4.0]);

    let reason = invalid_input_reason(run(&config(vec![x, other.clone()])));
    assert!(reason.contains("x_normalised.tabular"), "{}", reason);
    assert_eq!(
        fs::read_to_string(&other).unwrap(),
        "chr1\t0\t50\t3\nchr1\t50\t100\t4\n"
    );
}

#[test]
fn test_rejected_run_draws_no_plots() {
    let dir = tempdir().unwrap();
    let plot_dir = dir.path().join("plots");
    let bg = write_track(dir.path(), "s.bg", &[1.0, 2.0, 3.0]);
    let txt = write_track(dir.path(), "s.txt", &[4.0, 5.0, 6.0]);

    let mut cfg = RunConfig::new(vec![bg, txt]);
    cfg.plots = PlotConfig {
        boxplot: true,
        density: true,
        output_dir: plot_dir.clone(),
        ..PlotConfig::default()
    };

    assert!(matches!(run(&cfg), Err(QnormError::InvalidInput { .. })));
    assert!(!plot_dir.exists());
    assert!(!cfg.plots.boxplot_path().exists());
    assert!(!cfg.plots.density_path().exists());
}
