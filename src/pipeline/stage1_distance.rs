use crate::input::{InputBundle, InputTable};
use crate::model::DiscrError;
use crate::model::distance::{DistanceMatrix, DistanceMetric, FeatureStack};

#[derive(Debug)]
pub struct Stage1Output {
    pub distances: DistanceMatrix,
    pub metric: Option<DistanceMetric>,
    pub n_features: Option<usize>,
}

pub fn run_stage1(bundle: &InputBundle) -> Result<Stage1Output, DiscrError> {
    let (distances, metric, n_features) = match &bundle.table {
        InputTable::Distances(rows) => (DistanceMatrix::from_rows(rows.clone())?, None, None),
        InputTable::Features { rows, metric } => {
            let stack = FeatureStack::from_rows(rows.clone())?;
            let n_features = stack.n_features();
            (
                build_distance_matrix(&stack, *metric),
                Some(*metric),
                Some(n_features),
            )
        }
    };

    if distances.n() != bundle.labels.len() {
        return Err(DiscrError::InvalidInput(format!(
            "distance matrix has {} scans but {} subject labels were given",
            distances.n(),
            bundle.labels.len()
        )));
    }

    let asymmetry = distances.asymmetry();
    if asymmetry > 0.0 {
        crate::warn!(
            "distance matrix is not symmetric (max |D[i][j] - D[j][i]| = {}); scoring uses rows as given",
            asymmetry
        );
    }
    let negatives = distances.negative_count();
    if negatives > 0 {
        crate::warn!("distance matrix has {} negative off-diagonal entries", negatives);
    }

    crate::info!(
        "distance matrix ready: n_scans={}, metric={}",
        distances.n(),
        metric.map(|m| m.name()).unwrap_or("precomputed")
    );

    Ok(Stage1Output {
        distances,
        metric,
        n_features,
    })
}

/// Pairwise distances between every pair of scans; symmetric with a zero diagonal.
pub fn build_distance_matrix(features: &FeatureStack, metric: DistanceMetric) -> DistanceMatrix {
    let n = features.n_scans();
    let mut out = DistanceMatrix::zeros(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = metric.distance(features.row(i), features.row(j));
            out.set_symmetric(i, j, d);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_distance.rs"]
mod tests;
