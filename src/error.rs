//! Error types for the prediction service

use thiserror::Error;

/// Errors raised while assembling a submission or running inference.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Every machine count was unset or zero after defaulting.
    #[error("please provide at least one non-zero machine count")]
    EmptySubmission,

    /// One of the regression models failed to produce a prediction.
    #[error("{model} model inference failed: {message}")]
    Inference {
        model: &'static str,
        message: String,
    },
}

/// Errors raised while appending a row to the prediction log sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error(
        "spreadsheet '{0}' could not be found; ensure it exists and is shared \
         with the service account email"
    )]
    SpreadsheetNotFound(String),

    #[error("sheets authentication failed: {0}")]
    Auth(String),

    #[error("sheets request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sheets api returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid service account credentials: {0}")]
    Credentials(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_submission_message() {
        let err = PredictError::EmptySubmission;
        assert_eq!(
            err.to_string(),
            "please provide at least one non-zero machine count"
        );
    }

    #[test]
    fn test_sheet_not_found_names_the_spreadsheet() {
        let err = SheetError::SpreadsheetNotFound("Predictions Data".to_string());
        let message = err.to_string();
        assert!(message.contains("Predictions Data"));
        assert!(message.contains("shared"));
    }
}
