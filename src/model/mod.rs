pub mod distance;
pub mod labels;
pub mod options;
pub mod scores;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
