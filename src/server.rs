//! HTTP surface for the prediction service
//!
//! `GET /` serves the machine-count entry form, `POST /api/predict` runs one
//! submission through the assemble -> predict -> log sequence, and
//! `GET /health` reports liveness.

use crate::error::PredictError;
use crate::features::FeatureAssembler;
use crate::metrics::ServiceMetrics;
use crate::models::regression::RegressionEngine;
use crate::sheets::SheetLogger;
use crate::types::submission::MachineCounts;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Shared state handed to every request handler.
///
/// The engine and logger are constructed once at startup and injected here;
/// nothing in the request path reaches for globals.
pub struct AppState {
    pub assembler: FeatureAssembler,
    pub engine: RegressionEngine,
    pub logger: Option<SheetLogger>,
    pub metrics: Arc<ServiceMetrics>,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/predict", post(predict_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Successful prediction response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub submission_id: String,
    pub electricity_kwh: f64,
    pub steam_kg: f64,
    pub water_cum: f64,
    /// Result lines rounded to two decimals, labeled by unit
    pub display: [String; 3],
    /// Present when the prediction could not be recorded in the log sheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_warning: Option<String>,
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub models: Vec<&'static str>,
}

async fn index_handler() -> Html<&'static str> {
    Html(FORM_PAGE)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        models: state.engine.model_names(),
    })
}

/// Run one submission: assemble features, predict, append to the log sheet.
///
/// Validation failures reject the submission before any model call or log
/// append. A failed log append downgrades to a warning on the response; the
/// predictions are still returned.
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Json(counts): Json<MachineCounts>,
) -> Result<Json<PredictResponse>, ApiError> {
    let start_time = Instant::now();

    let features = state.assembler.assemble(&counts).map_err(|e| {
        state.metrics.record_rejection();
        ApiError(e)
    })?;

    let estimate = state.engine.predict(&features).map_err(ApiError)?;

    let log_warning = match &state.logger {
        Some(logger) => match logger.append(&counts.resolved(), &estimate).await {
            Ok(()) => None,
            Err(e) => {
                warn!(
                    submission_id = %estimate.submission_id,
                    error = %e,
                    "Failed to append prediction to log sheet"
                );
                state.metrics.record_log_failure();
                Some(format!("An error occurred while saving to the log sheet: {}", e))
            }
        },
        None => {
            warn!(
                submission_id = %estimate.submission_id,
                "Sheet logging not configured; prediction was not recorded"
            );
            Some("Sheet logging is not configured; the prediction was not recorded".to_string())
        }
    };

    state.metrics.record_submission(start_time.elapsed());

    info!(
        submission_id = %estimate.submission_id,
        electricity_kwh = estimate.electricity_kwh,
        steam_kg = estimate.steam_kg,
        water_cum = estimate.water_cum,
        processing_time_us = start_time.elapsed().as_micros(),
        "Prediction complete"
    );

    Ok(Json(PredictResponse {
        submission_id: estimate.submission_id.clone(),
        electricity_kwh: estimate.electricity_kwh,
        steam_kg: estimate.steam_kg,
        water_cum: estimate.water_cum,
        display: estimate.display_lines(),
        log_warning,
    }))
}

/// Maps prediction errors onto HTTP statuses.
pub struct ApiError(pub PredictError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            PredictError::EmptySubmission => StatusCode::UNPROCESSABLE_ENTITY,
            PredictError::Inference { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Entry form: nine labeled day/night pairs, one submit action, and a
/// results panel. Field names match the submission schema.
const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Multi-Consumption Prediction</title>
<style>
  body { font-family: sans-serif; max-width: 760px; margin: 2em auto; }
  h1 { text-align: center; }
  fieldset { border: 1px solid #ccc; margin-bottom: 0.8em; }
  label { display: inline-block; width: 3.2em; }
  input { width: 5em; margin-right: 1.5em; }
  #results { margin-top: 1.5em; font-weight: bold; }
  .warning { color: #b00; font-weight: normal; }
</style>
</head>
<body>
<h1>Multi-Consumption Prediction</h1>
<p>Enter machine day and night counts, then predict consumption.</p>
<form id="counts">
  <fieldset><legend>Knitting Machines</legend>
    <label>Day</label><input type="number" min="0" step="1" name="knitting_day">
    <label>Night</label><input type="number" min="0" step="1" name="knitting_night">
  </fieldset>
  <fieldset><legend>Bulk Dye Machines</legend>
    <label>Day</label><input type="number" min="0" step="1" name="bulk_dye_day">
    <label>Night</label><input type="number" min="0" step="1" name="bulk_dye_night">
  </fieldset>
  <fieldset><legend>Sample Dye Machines</legend>
    <label>Day</label><input type="number" min="0" step="1" name="sample_dye_day">
    <label>Night</label><input type="number" min="0" step="1" name="sample_dye_night">
  </fieldset>
  <fieldset><legend>Dryers</legend>
    <label>Day</label><input type="number" min="0" step="1" name="dryers_day">
    <label>Night</label><input type="number" min="0" step="1" name="dryers_night">
  </fieldset>
  <fieldset><legend>Presetting Machines</legend>
    <label>Day</label><input type="number" min="0" step="1" name="presetting_day">
    <label>Night</label><input type="number" min="0" step="1" name="presetting_night">
  </fieldset>
  <fieldset><legend>Chillers</legend>
    <label>Day</label><input type="number" min="0" step="1" name="chillers_day">
    <label>Night</label><input type="number" min="0" step="1" name="chillers_night">
  </fieldset>
  <fieldset><legend>AHU</legend>
    <label>Day</label><input type="number" min="0" step="1" name="ahu_day">
    <label>Night</label><input type="number" min="0" step="1" name="ahu_night">
  </fieldset>
  <fieldset><legend>Compressors</legend>
    <label>Day</label><input type="number" min="0" step="1" name="compressor_day">
    <label>Night</label><input type="number" min="0" step="1" name="compressor_night">
  </fieldset>
  <fieldset><legend>Luwa</legend>
    <label>Day</label><input type="number" min="0" step="1" name="luwa_day">
    <label>Night</label><input type="number" min="0" step="1" name="luwa_night">
  </fieldset>
  <button type="submit">Predict Consumption</button>
</form>
<div id="results"></div>
<script>
document.getElementById('counts').addEventListener('submit', async (event) => {
  event.preventDefault();
  const body = {};
  for (const input of event.target.querySelectorAll('input')) {
    if (input.value !== '') body[input.name] = parseInt(input.value, 10);
  }
  const results = document.getElementById('results');
  results.textContent = '';
  const response = await fetch('/api/predict', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  const data = await response.json();
  if (!response.ok) {
    results.innerHTML = '<p class="warning"></p>';
    results.querySelector('p').textContent = data.error;
    return;
  }
  for (const line of data.display) {
    const p = document.createElement('p');
    p.textContent = line;
    results.appendChild(p);
  }
  if (data.log_warning) {
    const p = document.createElement('p');
    p.className = 'warning';
    p.textContent = data.log_warning;
    results.appendChild(p);
  }
});
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_422() {
        let response = ApiError(PredictError::EmptySubmission).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_inference_errors_map_to_500() {
        let response = ApiError(PredictError::Inference {
            model: "steam",
            message: "boom".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_form_page_covers_all_fields() {
        for name in crate::types::submission::FIELD_LABELS {
            // "Knitting - D" -> knitting_day
            let field = name
                .to_lowercase()
                .replace(" - d", "_day")
                .replace(" - n", "_night")
                .replace(' ', "_");
            assert!(
                FORM_PAGE.contains(&format!("name=\"{}\"", field)),
                "form is missing field {}",
                field
            );
        }
    }

    // Full request-path tests require the ONNX model files; the assembler,
    // engine error mapping, and sheet row layout are covered in their own
    // modules.
}
