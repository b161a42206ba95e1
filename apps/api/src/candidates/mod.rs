// Candidate Registry
// Validates intake form submissions, stages the resume into the temp bucket,
// and records the candidate row.

pub mod handlers;
pub mod registry;
pub mod validation;
