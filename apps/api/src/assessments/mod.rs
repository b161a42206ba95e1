// Resume Categorization Engine
// Records screening assessments and files the candidate's resume into the
// qualified or unqualified bucket according to the configured rule.

pub mod categorize;
pub mod handlers;
pub mod policy;
