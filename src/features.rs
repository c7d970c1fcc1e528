//! Feature assembly for consumption model inference.
//!
//! This module maps a submission's machine counts onto the fixed-order
//! feature vector the regression models were trained against.

use crate::error::PredictError;
use crate::types::submission::{MachineCounts, FIELD_COUNT, FIELD_LABELS};

/// Assembles model input features from operator submissions.
///
/// Features are produced in the exact order expected by the ONNX models.
pub struct FeatureAssembler;

impl FeatureAssembler {
    /// Create a new feature assembler.
    pub fn new() -> Self {
        Self
    }

    /// Assemble the feature vector for a submission.
    ///
    /// Unset counts default to zero. A submission that is all zero after
    /// defaulting is rejected before any model sees it.
    pub fn assemble(&self, counts: &MachineCounts) -> Result<Vec<f32>, PredictError> {
        let resolved = counts.resolved();

        if resolved.iter().all(|&count| count == 0) {
            return Err(PredictError::EmptySubmission);
        }

        Ok(resolved.iter().map(|&count| count as f32).collect())
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FIELD_COUNT
    }

    /// Get feature names (matching training-schema order).
    pub fn feature_names(&self) -> [&'static str; FIELD_COUNT] {
        FIELD_LABELS
    }
}

impl Default for FeatureAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_unset_submission_rejected() {
        let assembler = FeatureAssembler::new();
        let result = assembler.assemble(&MachineCounts::default());

        assert!(matches!(result, Err(PredictError::EmptySubmission)));
    }

    #[test]
    fn test_explicit_zeros_rejected() {
        let assembler = FeatureAssembler::new();
        let counts = MachineCounts {
            knitting_day: Some(0),
            luwa_night: Some(0),
            ..Default::default()
        };

        assert!(matches!(
            assembler.assemble(&counts),
            Err(PredictError::EmptySubmission)
        ));
    }

    #[test]
    fn test_single_count_passes_validation() {
        let assembler = FeatureAssembler::new();
        let counts = MachineCounts {
            knitting_day: Some(5),
            ..Default::default()
        };

        let features = assembler.assemble(&counts).unwrap();

        assert_eq!(features.len(), assembler.feature_count());
        assert_eq!(features[0], 5.0);
        assert!(features[1..].iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_provided_counts_preserved_in_order() {
        let assembler = FeatureAssembler::new();
        let counts = MachineCounts {
            knitting_night: Some(3),
            dryers_day: Some(8),
            compressor_night: Some(2),
            ..Default::default()
        };

        let features = assembler.assemble(&counts).unwrap();

        assert_eq!(features[1], 3.0); // Knitting - N
        assert_eq!(features[6], 8.0); // Dryers - D
        assert_eq!(features[15], 2.0); // Compressor - N
    }

    #[test]
    fn test_feature_count() {
        let assembler = FeatureAssembler::new();
        assert_eq!(assembler.feature_count(), 18);
        assert_eq!(assembler.feature_names().len(), 18);
    }
}
