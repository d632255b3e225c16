use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod labels;
pub mod reader;
pub mod table;

use labels::parse_labels;
use table::parse_numeric_table;

use crate::model::distance::DistanceMetric;

#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Distances(PathBuf),
    Features {
        path: PathBuf,
        metric: DistanceMetric,
    },
}

impl InputSource {
    pub fn path(&self) -> &Path {
        match self {
            InputSource::Distances(path) => path,
            InputSource::Features { path, .. } => path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InputSource::Distances(_) => "distances",
            InputSource::Features { .. } => "features",
        }
    }
}

#[derive(Debug, Clone)]
pub enum InputTable {
    Distances(Vec<Vec<f64>>),
    Features {
        rows: Vec<Vec<f64>>,
        metric: DistanceMetric,
    },
}

#[derive(Debug, Clone)]
pub struct InputBundle {
    pub table_path: PathBuf,
    pub labels_path: PathBuf,
    pub table: InputTable,
    pub labels: Vec<String>,
}

impl InputBundle {
    pub fn n_scans(&self) -> usize {
        self.labels.len()
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

pub fn load_input(source: &InputSource, labels_path: &Path) -> Result<InputBundle, InputError> {
    crate::info!(
        "discovered input files: {}={}, labels={}",
        source.kind(),
        source.path().display(),
        labels_path.display()
    );

    let rows = parse_numeric_table(source.path())?;
    let labels = parse_labels(labels_path)?;

    if rows.len() != labels.len() {
        return Err(InputError::InvalidInput(format!(
            "{} has {} rows but {} has {} labels",
            source.path().display(),
            rows.len(),
            labels_path.display(),
            labels.len()
        )));
    }

    let table = match source {
        InputSource::Distances(_) => InputTable::Distances(rows),
        InputSource::Features { metric, .. } => InputTable::Features {
            rows,
            metric: *metric,
        },
    };

    Ok(InputBundle {
        table_path: source.path().to_path_buf(),
        labels_path: labels_path.to_path_buf(),
        table,
        labels,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
