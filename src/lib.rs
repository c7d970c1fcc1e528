//! Multi-Consumption Prediction Service Library
//!
//! Predicts mill electricity, steam, and water consumption from
//! operator-entered machine usage counts, and records each prediction in an
//! append-only Google Sheets log.

pub mod config;
pub mod error;
pub mod features;
pub mod metrics;
pub mod models;
pub mod server;
pub mod sheets;
pub mod types;

pub use config::AppConfig;
pub use error::{PredictError, SheetError};
pub use features::FeatureAssembler;
pub use models::regression::RegressionEngine;
pub use sheets::SheetLogger;
pub use types::{estimate::ConsumptionEstimate, submission::MachineCounts};
