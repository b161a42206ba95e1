pub mod assessment;
pub mod candidate;
