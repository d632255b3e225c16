use serde::Serialize;

/// One reliability density value: how well scan `partner` is matched to `scan`
/// relative to every other-subject scan. `partner` is `None` for a scan whose
/// subject has no repeats; such entries always carry NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RdfEntry {
    pub scan: usize,
    pub partner: Option<usize>,
    pub score: f64,
}

impl RdfEntry {
    pub fn no_repeat(scan: usize) -> Self {
        Self {
            scan,
            partner: None,
            score: f64::NAN,
        }
    }

    pub fn is_no_repeat(&self) -> bool {
        self.partner.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReliabilityScores {
    pub entries: Vec<RdfEntry>,
}

impl ReliabilityScores {
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.score).collect()
    }

    /// Scores of same-subject pairs; no-repeat markers dropped.
    pub fn pair_values(&self) -> Vec<f64> {
        self.entries
            .iter()
            .filter(|e| !e.is_no_repeat())
            .map(|e| e.score)
            .collect()
    }

    pub fn n_pairs(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_no_repeat()).count()
    }

    pub fn n_no_repeat(&self) -> usize {
        self.entries.iter().filter(|e| e.is_no_repeat()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RdfEntry> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Discriminability {
    pub score: f64,
    pub n_used: usize,
    pub n_outliers: usize,
    pub n_unique: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectSummary {
    pub subject: String,
    pub n_scans: usize,
    pub n_pairs: usize,
    pub mean_rdf: f64,
}
