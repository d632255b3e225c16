use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::model::DiscrError;

/// Dense N×N pairwise distance matrix, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DiscrError> {
        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(DiscrError::InvalidInput(format!(
                    "distance matrix is not square: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            values.extend(row);
        }
        Ok(Self { n, values })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    pub(crate) fn set_symmetric(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.n + j] = value;
        self.values[j * self.n + i] = value;
    }

    /// Largest `|D[i][j] - D[j][i]|` over all pairs; 0.0 for a symmetric matrix.
    pub fn asymmetry(&self) -> f64 {
        let mut max = 0.0f64;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let delta = (self.get(i, j) - self.get(j, i)).abs();
                if delta > max {
                    max = delta;
                }
            }
        }
        max
    }

    /// Number of off-diagonal entries that are negative.
    pub fn negative_count(&self) -> usize {
        let mut count = 0usize;
        for i in 0..self.n {
            for (j, &v) in self.row(i).iter().enumerate() {
                if i != j && v < 0.0 {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Per-scan flattened feature vectors (e.g. connectome correlation matrices).
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStack {
    n_features: usize,
    rows: Vec<Vec<f64>>,
}

impl FeatureStack {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DiscrError> {
        let n_features = rows.first().map(|r| r.len()).unwrap_or(0);
        if !rows.is_empty() && n_features == 0 {
            return Err(DiscrError::InvalidInput(
                "feature vectors are empty".to_string(),
            ));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_features {
                return Err(DiscrError::InvalidInput(format!(
                    "feature vector {} has {} values, expected {}",
                    i,
                    row.len(),
                    n_features
                )));
            }
        }
        Ok(Self { n_features, rows })
    }

    /// Flattens each per-scan matrix row by row.
    pub fn from_matrices(matrices: &[Vec<Vec<f64>>]) -> Result<Self, DiscrError> {
        let rows = matrices
            .iter()
            .map(|m| m.iter().flatten().copied().collect::<Vec<_>>())
            .collect();
        Self::from_rows(rows)
    }

    pub fn n_scans(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Cityblock,
    Cosine,
    Correlation,
}

impl DistanceMetric {
    pub fn name(self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Cityblock => "cityblock",
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Correlation => "correlation",
        }
    }

    pub fn distance(self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
            DistanceMetric::Cityblock => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
            DistanceMetric::Cosine => cosine_distance(a, b),
            DistanceMetric::Correlation => {
                if a == b {
                    return 0.0;
                }
                let ca = centered(a);
                let cb = centered(b);
                if ca.iter().all(|&v| v == 0.0) || cb.iter().all(|&v| v == 0.0) {
                    return 1.0;
                }
                one_minus_cosine(&ca, &cb)
            }
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(DistanceMetric::Euclidean),
            "cityblock" | "manhattan" => Ok(DistanceMetric::Cityblock),
            "cosine" => Ok(DistanceMetric::Cosine),
            "correlation" => Ok(DistanceMetric::Correlation),
            other => Err(format!(
                "unknown metric '{other}' (use euclidean|cityblock|cosine|correlation)"
            )),
        }
    }
}

fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    if a == b {
        return 0.0;
    }
    one_minus_cosine(a, b)
}

/// `1 - cos(a, b)`; 1.0 when either vector has zero norm.
fn one_minus_cosine(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0f64;
    let mut na = 0f64;
    let mut nb = 0f64;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na <= 0.0 || nb <= 0.0 {
        return 1.0;
    }
    (1.0 - dot / (na.sqrt() * nb.sqrt())).max(0.0)
}

fn centered(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| v - mean).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/distance.rs"]
mod tests;
