use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_discrimqc_main_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn parse(args: &[&str]) -> Result<RunConfig, clap::Error> {
    let cli = Cli::try_parse_from(std::iter::once("kira-discrimqc").chain(args.iter().copied()))?;
    Ok(match cli.command {
        Command::Run(args) => RunConfig::from(args),
    })
}

#[test]
fn test_parse_args_distances_defaults() {
    let config = parse(&[
        "run",
        "--distances",
        "d.tsv",
        "--labels",
        "labels.txt",
        "--out",
        "out",
    ])
    .unwrap();
    assert_eq!(config.source, InputSource::Distances(PathBuf::from("d.tsv")));
    assert_eq!(config.labels_path, PathBuf::from("labels.txt"));
    assert_eq!(config.out_dir, PathBuf::from("out"));
    assert_eq!(config.options, DiscrOptions::default());
    assert_eq!(config.permutations, None);
    assert_eq!(config.seed, 42);
}

#[test]
fn test_parse_args_features_with_options() {
    let config = parse(&[
        "run",
        "--features",
        "f.tsv",
        "--metric",
        "correlation",
        "--labels",
        "labels.txt",
        "--out",
        "out",
        "--threshold",
        "0.1",
        "--keep-outliers",
        "--verbose",
        "--permutations",
        "100",
        "--seed",
        "5",
    ])
    .unwrap();
    assert_eq!(
        config.source,
        InputSource::Features {
            path: PathBuf::from("f.tsv"),
            metric: DistanceMetric::Correlation,
        }
    );
    assert!(!config.options.remove_outliers);
    assert!(config.options.verbose);
    assert_eq!(config.options.threshold, 0.1);
    assert_eq!(config.permutations, Some(100));
    assert_eq!(config.seed, 5);
}

#[test]
fn test_parse_args_requires_one_source() {
    assert!(parse(&["run", "--labels", "l.txt", "--out", "out"]).is_err());
    assert!(
        parse(&[
            "run",
            "--distances",
            "d.tsv",
            "--features",
            "f.tsv",
            "--labels",
            "l.txt",
            "--out",
            "out",
        ])
        .is_err()
    );
}

#[test]
fn test_parse_args_rejects_unknown_metric() {
    assert!(
        parse(&[
            "run",
            "--features",
            "f.tsv",
            "--metric",
            "hamming",
            "--labels",
            "l.txt",
            "--out",
            "out",
        ])
        .is_err()
    );
}

fn write(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_run_end_to_end_phase_scenario() {
    let dir = make_temp_dir();
    let features = dir.join("features.tsv");
    let labels = dir.join("labels.txt");
    let out = dir.join("out");
    write(&features, "1\t1\t1\t1\n1\t-1\t-1\t1\n1\t1\t1\t1\n1\t-1\t-1\t1\n");
    write(&labels, "subject\n1\n2\n1\n2\n");

    let config = RunConfig {
        source: InputSource::Features {
            path: features,
            metric: DistanceMetric::Euclidean,
        },
        labels_path: labels,
        out_dir: out.clone(),
        options: DiscrOptions::default(),
        permutations: Some(10),
        seed: 1,
    };
    run(&config).unwrap();

    let json = std::fs::read_to_string(out.join("summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["discriminability"]["score"], 1.0);
    assert_eq!(value["input"]["n_subjects"], 2);
    assert_eq!(value["input"]["metric"], "euclidean");
    assert_eq!(value["permutation"]["n_permutations"], 10);
    assert!(out.join("rdf.tsv").exists());
    assert!(out.join("subjects.tsv").exists());
    assert!(out.join("report.txt").exists());
}

#[test]
fn test_run_reports_label_mismatch() {
    let dir = make_temp_dir();
    let distances = dir.join("d.tsv");
    let labels = dir.join("labels.txt");
    write(&distances, "0\t1\t2\n1\t0\n2\t3\t0\n");
    write(&labels, "a\nb\na\n");

    let config = RunConfig {
        source: InputSource::Distances(distances),
        labels_path: labels,
        out_dir: dir.join("out"),
        options: DiscrOptions::default(),
        permutations: None,
        seed: 42,
    };
    let err = run(&config).unwrap_err();
    assert!(matches!(err, RunError::Discr(_)));
}
