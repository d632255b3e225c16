use super::*;
use crate::model::distance::{DistanceMetric, FeatureStack};
use crate::pipeline::stage1_distance::build_distance_matrix;

fn clustered() -> (DistanceMatrix, Vec<String>) {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for subject in 0..4 {
        let base = subject as f64 * 10.0;
        rows.push(vec![base]);
        rows.push(vec![base + 0.1]);
        labels.push(format!("sub-{subject}"));
        labels.push(format!("sub-{subject}"));
    }
    let stack = FeatureStack::from_rows(rows).unwrap();
    (build_distance_matrix(&stack, DistanceMetric::Euclidean), labels)
}

#[test]
fn test_zero_permutations_rejected() {
    let (d, labels) = clustered();
    assert!(permutation_test(&d, &labels, &DiscrOptions::default(), 0, 1).is_err());
}

#[test]
fn test_clustered_data_is_significant() {
    let (d, labels) = clustered();
    let out = permutation_test(&d, &labels, &DiscrOptions::default(), 99, 7).unwrap();
    assert_eq!(out.observed, 1.0);
    assert!(out.p_value > 0.0 && out.p_value <= 1.0);
    assert!(out.p_value < 0.2);
    assert!(out.null_mean < out.observed);
    assert_eq!(out.n_permutations, 99);
    assert_eq!(out.seed, 7);
}

#[test]
fn test_same_seed_same_result() {
    let (d, labels) = clustered();
    let a = permutation_test(&d, &labels, &DiscrOptions::default(), 25, 11).unwrap();
    let b = permutation_test(&d, &labels, &DiscrOptions::default(), 25, 11).unwrap();
    assert_eq!(a.p_value.to_bits(), b.p_value.to_bits());
    assert_eq!(a.null_mean.to_bits(), b.null_mean.to_bits());
}

#[test]
fn test_unique_labels_give_nan_p_value() {
    let (d, _) = clustered();
    let labels: Vec<usize> = (0..d.n()).collect();
    let out = permutation_test(&d, &labels, &DiscrOptions::default(), 5, 3).unwrap();
    assert!(out.observed.is_nan());
    assert!(out.p_value.is_nan());
    assert_eq!(out.n_null_nan, 5);
}
