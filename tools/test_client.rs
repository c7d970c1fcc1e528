//! Test Submission Client
//!
//! Generates randomized machine-count submissions and posts them to a
//! running prediction service.

use anyhow::Result;
use consumption_predictor::MachineCounts;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

/// Response shape returned by the predict endpoint
#[derive(Debug, Deserialize)]
struct PredictResponse {
    submission_id: String,
    display: Vec<String>,
    log_warning: Option<String>,
}

/// Submission generator for testing
struct SubmissionGenerator {
    rng: rand::rngs::ThreadRng,
}

impl SubmissionGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Generate a submission with a random subset of fields set.
    fn generate(&mut self) -> MachineCounts {
        let mut counts = MachineCounts {
            knitting_day: self.maybe_count(),
            knitting_night: self.maybe_count(),
            bulk_dye_day: self.maybe_count(),
            bulk_dye_night: self.maybe_count(),
            sample_dye_day: self.maybe_count(),
            sample_dye_night: self.maybe_count(),
            dryers_day: self.maybe_count(),
            dryers_night: self.maybe_count(),
            presetting_day: self.maybe_count(),
            presetting_night: self.maybe_count(),
            chillers_day: self.maybe_count(),
            chillers_night: self.maybe_count(),
            ahu_day: self.maybe_count(),
            ahu_night: self.maybe_count(),
            compressor_day: self.maybe_count(),
            compressor_night: self.maybe_count(),
            luwa_day: self.maybe_count(),
            luwa_night: self.maybe_count(),
        };

        // The service rejects all-zero submissions; keep the generator
        // producing acceptable ones
        if counts.is_all_zero() {
            counts.knitting_day = Some(self.rng.gen_range(1..=12));
        }

        counts
    }

    fn maybe_count(&mut self) -> Option<u32> {
        if self.rng.gen_bool(0.7) {
            Some(self.rng.gen_range(0..=12))
        } else {
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let base_url =
        std::env::var("PREDICTOR_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let count: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(5);

    info!(base_url = %base_url, count = count, "Posting test submissions");

    let client = reqwest::Client::new();
    let mut generator = SubmissionGenerator::new();

    for i in 0..count {
        let counts = generator.generate();

        let response = client
            .post(format!("{}/api/predict", base_url))
            .json(&counts)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                submission = i,
                status = %response.status(),
                body = %response.text().await.unwrap_or_default(),
                "Submission rejected"
            );
            continue;
        }

        let result: PredictResponse = response.json().await?;
        info!(submission_id = %result.submission_id, "Prediction received");
        for line in &result.display {
            info!("  {}", line);
        }
        if let Some(warning) = &result.log_warning {
            warn!("  {}", warning);
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    Ok(())
}
