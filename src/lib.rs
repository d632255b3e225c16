pub mod input;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod tracing;

pub use model::DiscrError;
pub use model::distance::{DistanceMatrix, DistanceMetric, FeatureStack};
pub use model::labels::SubjectGroups;
pub use model::options::DiscrOptions;
pub use model::scores::{Discriminability, RdfEntry, ReliabilityScores, SubjectSummary};
pub use pipeline::stage1_distance::build_distance_matrix;
pub use pipeline::stage2_rdf::{compute_reliability_scores, summarize_subjects};
pub use pipeline::stage3_discr::{compute_discriminability, discr_stat};
pub use pipeline::stage4_permutation::{PermutationResult, permutation_test};
