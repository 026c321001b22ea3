// Career matching: profile validation, similarity kernels, weighted scoring,
// ranking and explanations. Scoring is pure over the shared read-only catalog.

pub mod explain;
pub mod handlers;
pub mod profile;
pub mod scorer;
pub mod similarity;
