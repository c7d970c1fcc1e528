//! Type definitions for the prediction service

pub mod estimate;
pub mod submission;

pub use estimate::ConsumptionEstimate;
pub use submission::MachineCounts;
