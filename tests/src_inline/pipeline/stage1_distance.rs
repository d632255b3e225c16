use std::path::PathBuf;

use super::*;

fn bundle(table: InputTable, labels: &[&str]) -> InputBundle {
    InputBundle {
        table_path: PathBuf::from("table.tsv"),
        labels_path: PathBuf::from("labels.txt"),
        table,
        labels: labels.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_build_distance_matrix_symmetric_zero_diagonal() {
    let stack = FeatureStack::from_rows(vec![
        vec![0.0, 0.0],
        vec![3.0, 4.0],
        vec![6.0, 8.0],
    ])
    .unwrap();
    let d = build_distance_matrix(&stack, DistanceMetric::Euclidean);
    assert_eq!(d.n(), 3);
    for i in 0..3 {
        assert_eq!(d.get(i, i), 0.0);
    }
    assert_eq!(d.get(0, 1), 5.0);
    assert_eq!(d.get(1, 0), 5.0);
    assert_eq!(d.get(0, 2), 10.0);
    assert_eq!(d.asymmetry(), 0.0);
}

#[test]
fn test_run_stage1_precomputed() {
    let b = bundle(
        InputTable::Distances(vec![vec![0.0, 1.0], vec![1.0, 0.0]]),
        &["a", "b"],
    );
    let out = run_stage1(&b).unwrap();
    assert_eq!(out.distances.n(), 2);
    assert_eq!(out.metric, None);
    assert_eq!(out.n_features, None);
}

#[test]
fn test_run_stage1_features() {
    let b = bundle(
        InputTable::Features {
            rows: vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
            metric: DistanceMetric::Cityblock,
        },
        &["a", "b"],
    );
    let out = run_stage1(&b).unwrap();
    assert_eq!(out.metric, Some(DistanceMetric::Cityblock));
    assert_eq!(out.n_features, Some(3));
    assert_eq!(out.distances.get(0, 1), 2.0);
}

#[test]
fn test_run_stage1_rejects_non_square() {
    let b = bundle(
        InputTable::Distances(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 3.0]]),
        &["a", "b"],
    );
    assert!(run_stage1(&b).is_err());
}

#[test]
fn test_run_stage1_rejects_label_mismatch() {
    let b = bundle(
        InputTable::Distances(vec![vec![0.0, 1.0], vec![1.0, 0.0]]),
        &["a", "b", "c"],
    );
    let err = run_stage1(&b).unwrap_err();
    assert!(err.to_string().contains("3 subject labels"));
}

#[test]
fn test_run_stage1_accepts_asymmetric() {
    let b = bundle(
        InputTable::Distances(vec![vec![0.0, 1.0], vec![2.0, 0.0]]),
        &["a", "b"],
    );
    let out = run_stage1(&b).unwrap();
    assert_eq!(out.distances.asymmetry(), 1.0);
}
