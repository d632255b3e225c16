pub mod stage1_distance;
pub mod stage2_rdf;
pub mod stage3_discr;
pub mod stage4_permutation;
pub mod stage5_report;
