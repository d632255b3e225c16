use std::collections::BTreeMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::model::DiscrError;
use crate::model::distance::DistanceMatrix;
use crate::model::labels::SubjectGroups;
use crate::model::scores::{RdfEntry, ReliabilityScores, SubjectSummary};

#[derive(Debug)]
pub struct Stage2Output {
    pub scores: ReliabilityScores,
    pub groups: SubjectGroups,
    pub subjects: Vec<SubjectSummary>,
}

pub fn run_stage2(
    distances: &DistanceMatrix,
    labels: &[String],
) -> Result<Stage2Output, DiscrError> {
    check_dimensions(distances, labels.len())?;
    let groups = SubjectGroups::from_labels(labels);
    let scores = score_groups(distances, &groups);
    let subjects = summarize_subjects(&scores, labels);

    crate::info!(
        "reliability scores: subjects={}, repeated_subjects={}, pairs={}, no_repeat_scans={}",
        groups.n_groups(),
        groups.n_repeated_groups(),
        scores.n_pairs(),
        scores.n_no_repeat()
    );

    Ok(Stage2Output {
        scores,
        groups,
        subjects,
    })
}

/// Reliability density for every ordered same-subject pair `(i, j)`, `j != i`,
/// in scan order. A scan with no repeats yields one NaN marker entry.
///
/// For a pair the score is `1 - (less + 0.5 * equal) / M`, where `less` and
/// `equal` count inter-subject distances in row `i` below or exactly equal to
/// `D[i][j]`, and `M` is the number of inter-subject scans. Same-subject
/// columns (the diagonal included) never enter the comparison. `M == 0` gives
/// NaN. Ties use exact float equality.
pub fn compute_reliability_scores<L: Eq + Hash>(
    distances: &DistanceMatrix,
    labels: &[L],
) -> Result<ReliabilityScores, DiscrError> {
    check_dimensions(distances, labels.len())?;
    let groups = SubjectGroups::from_labels(labels);
    Ok(score_groups(distances, &groups))
}

fn check_dimensions(distances: &DistanceMatrix, n_labels: usize) -> Result<(), DiscrError> {
    if n_labels != distances.n() {
        return Err(DiscrError::InvalidInput(format!(
            "distance matrix dimension {} does not match {} subject labels",
            distances.n(),
            n_labels
        )));
    }
    Ok(())
}

fn score_groups(distances: &DistanceMatrix, groups: &SubjectGroups) -> ReliabilityScores {
    let n = distances.n();
    let mut entries = Vec::new();
    let mut excluded = vec![false; n];

    for i in 0..n {
        let members = groups.members_of(i);
        if members.len() == 1 {
            entries.push(RdfEntry::no_repeat(i));
            continue;
        }

        for &k in members {
            excluded[k] = true;
        }
        let row = distances.row(i);
        let n_inter = n - members.len();
        for &j in members {
            if j == i {
                continue;
            }
            entries.push(RdfEntry {
                scan: i,
                partner: Some(j),
                score: rdf_score(row, &excluded, row[j], n_inter),
            });
        }
        for &k in members {
            excluded[k] = false;
        }
    }

    ReliabilityScores { entries }
}

fn rdf_score(row: &[f64], excluded: &[bool], target: f64, n_inter: usize) -> f64 {
    if n_inter == 0 {
        return f64::NAN;
    }
    let mut less = 0usize;
    let mut equal = 0usize;
    for (&d, &skip) in row.iter().zip(excluded) {
        if skip {
            continue;
        }
        if d < target {
            less += 1;
        } else if d == target {
            equal += 1;
        }
    }
    1.0 - (less as f64 + 0.5 * equal as f64) / n_inter as f64
}

/// Mean pair score per subject, sorted by label.
pub fn summarize_subjects<L: Ord + Display>(
    scores: &ReliabilityScores,
    labels: &[L],
) -> Vec<SubjectSummary> {
    #[derive(Default)]
    struct Acc {
        n_scans: usize,
        n_pairs: usize,
        n_scored: usize,
        sum: f64,
    }

    let mut by_subject: BTreeMap<&L, Acc> = BTreeMap::new();
    for label in labels {
        by_subject.entry(label).or_default().n_scans += 1;
    }
    for entry in scores.iter() {
        if entry.is_no_repeat() {
            continue;
        }
        let Some(label) = labels.get(entry.scan) else {
            continue;
        };
        let acc = by_subject.entry(label).or_default();
        acc.n_pairs += 1;
        if !entry.score.is_nan() {
            acc.n_scored += 1;
            acc.sum += entry.score;
        }
    }

    by_subject
        .into_iter()
        .map(|(label, acc)| SubjectSummary {
            subject: label.to_string(),
            n_scans: acc.n_scans,
            n_pairs: acc.n_pairs,
            mean_rdf: if acc.n_scored == 0 {
                f64::NAN
            } else {
                acc.sum / acc.n_scored as f64
            },
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_rdf.rs"]
mod tests;
