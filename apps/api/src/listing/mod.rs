// Query/Listing Service
// Recruiter-facing view of every candidate with their latest assessment.

pub mod handlers;
pub mod query;
