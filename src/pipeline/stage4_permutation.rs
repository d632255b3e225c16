use std::hash::Hash;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::model::DiscrError;
use crate::model::distance::DistanceMatrix;
use crate::model::options::DiscrOptions;
use crate::pipeline::stage2_rdf::compute_reliability_scores;
use crate::pipeline::stage3_discr::discr_stat;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PermutationResult {
    pub observed: f64,
    pub p_value: f64,
    pub null_mean: f64,
    pub n_permutations: usize,
    pub n_null_nan: usize,
    pub seed: u64,
}

/// One-sample test of discriminability against a label-shuffling null.
///
/// `p = (1 + #{null >= observed}) / (1 + #{non-NaN null draws})`. The same
/// seed always reproduces the same null distribution.
pub fn permutation_test<L: Eq + Hash + Clone>(
    distances: &DistanceMatrix,
    labels: &[L],
    options: &DiscrOptions,
    n_permutations: usize,
    seed: u64,
) -> Result<PermutationResult, DiscrError> {
    if n_permutations == 0 {
        return Err(DiscrError::InvalidInput(
            "permutation count must be at least 1".to_string(),
        ));
    }
    let quiet = options.quiet();
    let observed = discr_stat(
        &compute_reliability_scores(distances, labels)?.values(),
        &quiet,
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut shuffled = labels.to_vec();
    let mut n_ge = 0usize;
    let mut n_valid = 0usize;
    let mut n_null_nan = 0usize;
    let mut sum = 0f64;

    for _ in 0..n_permutations {
        shuffled.shuffle(&mut rng);
        let stat = discr_stat(
            &compute_reliability_scores(distances, &shuffled)?.values(),
            &quiet,
        );
        if stat.is_nan() {
            n_null_nan += 1;
            continue;
        }
        n_valid += 1;
        sum += stat;
        if stat >= observed {
            n_ge += 1;
        }
    }

    let p_value = if observed.is_nan() {
        f64::NAN
    } else {
        (1 + n_ge) as f64 / (1 + n_valid) as f64
    };
    let null_mean = if n_valid == 0 {
        f64::NAN
    } else {
        sum / n_valid as f64
    };

    crate::info!(
        "permutation test: observed={}, p={}, null_mean={}, permutations={}",
        observed,
        p_value,
        null_mean,
        n_permutations
    );

    Ok(PermutationResult {
        observed,
        p_value,
        null_mean,
        n_permutations,
        n_null_nan,
        seed,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_permutation.rs"]
mod tests;
