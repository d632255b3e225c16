use serde::Serialize;

use crate::model::options::DiscrOptions;
use crate::model::scores::Discriminability;
use crate::pipeline::stage4_permutation::PermutationResult;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub source: String,
    pub path: String,
    pub labels: String,
    pub metric: Option<String>,
    pub n_features: Option<usize>,
    pub n_scans: usize,
    pub n_subjects: usize,
    pub n_repeated_subjects: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RdfStats {
    pub n_pairs: usize,
    pub n_no_repeat: usize,
    pub n_undefined: usize,
    pub min: f64,
    pub p10: f64,
    pub median: f64,
    pub p90: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputSummary,
    pub options: DiscrOptions,
    pub discriminability: Discriminability,
    pub rdf: RdfStats,
    pub permutation: Option<PermutationResult>,
}

pub fn format_f64_6(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    format!("{:.6}", v)
}

/// Nearest-rank quantile over the finite values; NaN when there are none.
pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx.min(n - 1)]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn rdf_stats(pair_values: &[f64], n_no_repeat: usize) -> RdfStats {
    RdfStats {
        n_pairs: pair_values.len(),
        n_no_repeat,
        n_undefined: pair_values.iter().filter(|v| v.is_nan()).count(),
        min: quantile_indexed(pair_values, 0.0),
        p10: p10(pair_values),
        median: median(pair_values),
        p90: p90(pair_values),
        max: quantile_indexed(pair_values, 1.0),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
