//! Multi-Consumption Prediction Service - Main Entry Point
//!
//! Serves the machine-count entry form, runs the three consumption
//! regressors on each submission, and appends the results to the prediction
//! log sheet.

use anyhow::Result;
use consumption_predictor::{
    config::{AppConfig, LoggingConfig},
    features::FeatureAssembler,
    metrics::{MetricsReporter, ServiceMetrics},
    models::regression::RegressionEngine,
    server::{self, AppState},
    sheets::{ServiceAccountKey, SheetLogger},
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    info!("Starting Multi-Consumption Prediction Service");

    let metrics = Arc::new(ServiceMetrics::new());

    let assembler = FeatureAssembler::new();
    info!(
        "Feature assembler initialized ({} features)",
        assembler.feature_count()
    );

    let engine = RegressionEngine::new(&config)?;
    info!(
        "Regression engine initialized with models: {:?}",
        engine.model_names()
    );

    let logger = match config.sheets.credential_blob() {
        Some(blob) => {
            let key = ServiceAccountKey::from_json(&blob)?;
            info!(
                spreadsheet_id = %config.sheets.spreadsheet_id,
                service_account = %key.client_email,
                "Sheet logging enabled"
            );
            Some(SheetLogger::new(
                key,
                config.sheets.spreadsheet_id.clone(),
                config.sheets.worksheet.clone(),
            )?)
        }
        None => {
            warn!("No sheets credential configured; predictions will not be recorded");
            None
        }
    };

    let state = Arc::new(AppState {
        assembler,
        engine,
        logger,
        metrics: metrics.clone(),
    });

    // Periodic metrics summary
    let reporter = MetricsReporter::new(metrics, 30);
    tokio::spawn(async move {
        reporter.start().await;
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, server::router(state)).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("consumption_predictor={}", logging.level).parse()?);

    if logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    Ok(())
}
