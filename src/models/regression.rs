//! Consumption regression engine
//!
//! Runs the three pre-trained regressors against an assembled feature
//! vector. The models are frozen black boxes loaded at process start and
//! handed to the engine by the caller; the engine itself holds no ambient
//! global state.

use crate::config::AppConfig;
use crate::error::PredictError;
use crate::models::loader::{LoadedModel, ModelLoader};
use crate::types::estimate::ConsumptionEstimate;
use anyhow::{Context, Result};
use std::sync::RwLock;
use tracing::debug;

/// Inference engine holding the three consumption regressors.
///
/// Each regressor maps the same 18-field feature vector to one scalar.
/// Sessions need mutable access to run, so each model sits behind its own
/// lock; the three calls have no ordering dependency between them.
pub struct RegressionEngine {
    electricity: RwLock<LoadedModel>,
    steam: RwLock<LoadedModel>,
    water: RwLock<LoadedModel>,
}

impl RegressionEngine {
    /// Create a new regression engine from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_models_dir(&config.models.models_dir, config.models.onnx_threads)
    }

    /// Create a regression engine with a custom models directory
    pub fn with_models_dir(models_dir: &str, onnx_threads: usize) -> Result<Self> {
        let loader = ModelLoader::with_threads(onnx_threads)?;
        let mut models = loader.load_required(models_dir)?.into_iter();

        // load_required returns models in MODEL_FILES order
        let electricity = models.next().context("electricity model missing")?;
        let steam = models.next().context("steam model missing")?;
        let water = models.next().context("water model missing")?;

        Ok(Self {
            electricity: RwLock::new(electricity),
            steam: RwLock::new(steam),
            water: RwLock::new(water),
        })
    }

    /// Get loaded model names
    pub fn model_names(&self) -> Vec<&'static str> {
        [&self.electricity, &self.steam, &self.water]
            .iter()
            .filter_map(|m| m.read().ok().map(|m| m.name))
            .collect()
    }

    /// Predict consumption for an assembled feature vector.
    ///
    /// All three regressors must succeed; there is no partial-result path.
    pub fn predict(&self, features: &[f32]) -> Result<ConsumptionEstimate, PredictError> {
        let electricity_kwh = self.run_model("electricity", &self.electricity, features)?;
        let steam_kg = self.run_model("steam", &self.steam, features)?;
        let water_cum = self.run_model("water", &self.water, features)?;

        debug!(
            electricity_kwh = electricity_kwh,
            steam_kg = steam_kg,
            water_cum = water_cum,
            "Inference complete"
        );

        Ok(ConsumptionEstimate::new(electricity_kwh, steam_kg, water_cum))
    }

    /// Run one regressor and surface any failure as an inference error.
    fn run_model(
        &self,
        name: &'static str,
        model_lock: &RwLock<LoadedModel>,
        features: &[f32],
    ) -> Result<f64, PredictError> {
        let mut model = model_lock.write().map_err(|e| PredictError::Inference {
            model: name,
            message: format!("lock error: {}", e),
        })?;

        Self::run_session(&mut model, features).map_err(|e| PredictError::Inference {
            model: name,
            message: e.to_string(),
        })
    }

    /// Run a session on features and extract the predicted scalar.
    fn run_session(model: &mut LoadedModel, features: &[f32]) -> Result<f64> {
        use ort::value::Tensor;

        // Input tensor shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create input tensor")?;

        let outputs = model
            .session
            .run(ort::inputs![&model.input_name => input_tensor])?;

        // Prefer the named output, then fall back to the first tensor output
        if let Some(output) = outputs.get(&model.output_name) {
            if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                if let Some(&value) = data.first() {
                    return Ok(value as f64);
                }
            }
        }

        for (output_name, output) in outputs.iter() {
            if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                if let Some(&value) = data.first() {
                    debug!(model = %model.name, output = %output_name, "Extracted from fallback output");
                    return Ok(value as f64);
                }
            }
        }

        anyhow::bail!("model produced no scalar output")
    }
}

#[cfg(test)]
mod tests {
    // Engine tests require the ONNX model files; the feature assembly and
    // estimate formatting around the engine are covered in their own modules.
}
