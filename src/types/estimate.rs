//! Predicted consumption data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Predicted consumption for one submission.
///
/// Carries the three scalar model outputs plus the metadata recorded in the
/// prediction log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumptionEstimate {
    /// Unique submission identifier
    pub submission_id: String,

    /// Predicted electricity consumption in kWh
    pub electricity_kwh: f64,

    /// Predicted steam consumption in kg
    pub steam_kg: f64,

    /// Predicted water consumption in cubic meters
    pub water_cum: f64,

    /// Prediction timestamp
    pub timestamp: DateTime<Utc>,
}

impl ConsumptionEstimate {
    /// Create a new estimate from the three model outputs.
    pub fn new(electricity_kwh: f64, steam_kg: f64, water_cum: f64) -> Self {
        Self {
            submission_id: uuid::Uuid::new_v4().to_string(),
            electricity_kwh,
            steam_kg,
            water_cum,
            timestamp: Utc::now(),
        }
    }

    /// User-facing result lines, rounded to two decimals and labeled by unit.
    pub fn display_lines(&self) -> [String; 3] {
        [
            format!("Electricity Consumption (kWh): {:.2}", self.electricity_kwh),
            format!("Steam Consumption (kg): {:.2}", self.steam_kg),
            format!("Water Consumption (Cu.m.): {:.2}", self.water_cum),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_serialization() {
        let estimate = ConsumptionEstimate::new(123.45, 67.8, 9.01);

        let json = serde_json::to_string(&estimate).unwrap();
        let deserialized: ConsumptionEstimate = serde_json::from_str(&json).unwrap();

        assert_eq!(estimate.submission_id, deserialized.submission_id);
        assert_eq!(estimate.electricity_kwh, deserialized.electricity_kwh);
    }

    #[test]
    fn test_display_lines_round_to_two_decimals() {
        let estimate = ConsumptionEstimate::new(123.45, 67.8, 9.01);

        let lines = estimate.display_lines();
        assert_eq!(lines[0], "Electricity Consumption (kWh): 123.45");
        assert_eq!(lines[1], "Steam Consumption (kg): 67.80");
        assert_eq!(lines[2], "Water Consumption (Cu.m.): 9.01");
    }

    #[test]
    fn test_submission_ids_are_unique() {
        let a = ConsumptionEstimate::new(1.0, 1.0, 1.0);
        let b = ConsumptionEstimate::new(1.0, 1.0, 1.0);
        assert_ne!(a.submission_id, b.submission_id);
    }
}
