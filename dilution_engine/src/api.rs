//! HTTP API for the Dilution Engine.
//!
//! This module exposes the calculator as a small JSON API using the
//! [`axum`](https://crates.io/crates/axum) framework.  Both the web and
//! the mobile front ends post the raw form fields here and render what
//! comes back, so the formulas live in exactly one place.

use crate::config::ServerConfig;
use crate::dilution::{parse_dilution, Ratio};
use crate::engine::{compute, compute_batch};
use crate::models::{CalculationInput, CalculationReport, CalculationResult};
use crate::validation::validate;
use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info};

/// Body of `POST /api/dilution`.
#[derive(Debug, Clone, Deserialize)]
pub struct DilutionRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Build the API router.
pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/dilution", post(dilution_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/calculate/batch", post(batch_handler))
}

/// Handler for GET /api/health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler for POST /api/dilution
pub async fn dilution_handler(Json(request): Json<DilutionRequest>) -> Json<Ratio> {
    let ratio = parse_dilution(&request.text);
    debug!(text = %request.text, label = %ratio.label, valid = ratio.valid, "parsed dilution");
    Json(ratio)
}

/// Handler for POST /api/calculate
///
/// The engine is total, so this always answers 200; field problems are
/// reported in `issues` next to the (possibly zeroed) numbers.
pub async fn calculate_handler(Json(input): Json<CalculationInput>) -> Json<CalculationReport> {
    let result = compute(&input);
    let issues = validate(&input);
    debug!(
        dilution = %input.dilution,
        issues = issues.len(),
        total_bath_cost = result.total_bath_cost,
        "calculated"
    );
    Json(CalculationReport { result, issues })
}

/// Handler for POST /api/calculate/batch
///
/// The batch runs on the blocking pool; if that task dies the client
/// gets a 500 rather than an empty list.
pub async fn batch_handler(
    Json(inputs): Json<Vec<CalculationInput>>,
) -> Result<Json<Vec<CalculationResult>>, (StatusCode, Json<Value>)> {
    debug!(count = inputs.len(), "calculating batch");
    match tokio::task::spawn_blocking(move || compute_batch(&inputs)).await {
        Ok(results) => Ok(Json(results)),
        Err(err) => {
            error!(%err, "batch calculation task failed");
            Err(internal_error(err))
        }
    }
}

/// Error body used when a request could not be processed.
fn internal_error(err: impl std::fmt::Display) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": err.to_string()})),
    )
}

/// Launch the API server and block until it terminates.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "dilution API listening");
    axum::serve(listener, router())
        .await
        .context("HTTP server terminated")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueKind;
    use crate::units::VolumeUnit;

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health_handler().await;
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_dilution_endpoint() {
        let Json(ratio) = dilution_handler(Json(DilutionRequest {
            text: "1 to 16".into(),
        }))
        .await;
        assert!(ratio.valid);
        assert_eq!(ratio.label, "1:16");
    }

    #[tokio::test]
    async fn test_calculate_reports_issues_alongside_result() {
        let input = CalculationInput {
            bottle_size: "1".into(),
            bottle_unit: VolumeUnit::Litre,
            bottle_cost: "10".into(),
            dilution: "oops".into(),
            ..Default::default()
        };
        let Json(report) = calculate_handler(Json(input)).await;
        assert!(!report.result.ratio.valid);
        assert_eq!(report.result.cost_per_ml_concentrate, 0.01);
        let kinds: Vec<_> = report.issues.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, [IssueKind::InvalidDilution, IssueKind::NonPositive]);
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let inputs: Vec<_> = ["1:4", "1:9"]
            .into_iter()
            .map(|d| CalculationInput {
                bottle_size: "100".into(),
                dilution: d.into(),
                ..Default::default()
            })
            .collect();
        let Json(results) = batch_handler(Json(inputs)).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].yield_from_bottle, 500.0);
        assert_eq!(results[1].yield_from_bottle, 1000.0);
    }

    #[test]
    fn test_internal_error_body() {
        let (status, Json(body)) = internal_error("task panicked");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "task panicked"}));
    }

    #[test]
    fn test_input_json_shape() {
        let input: CalculationInput = serde_json::from_str(
            r#"{"bottleSize":"473","bottleUnit":"ml","bottleCost":"29,99","dilution":"16x","mixUnit":"floz"}"#,
        )
        .unwrap();
        assert_eq!(input.bottle_cost, "29,99");
        assert_eq!(input.mix_unit, VolumeUnit::FluidOunce);
        assert_eq!(input.pump_ml, "");

        let json = serde_json::to_value(compute(&input)).unwrap();
        assert_eq!(json["ratio"]["label"], "1:16");
        assert_eq!(json["yieldFromBottle"], 8041.0);
        assert!(json.get("costPer100ml").is_some());
    }
}
