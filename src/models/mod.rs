//! ONNX regression model components

pub mod loader;
pub mod regression;

pub use loader::ModelLoader;
pub use regression::RegressionEngine;
