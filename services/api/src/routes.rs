use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use vehicle_check::engine::{
    normalize, HistoryAnalysisEngine, RawMotHistory, RawVehicleRecord, VehicleReport,
};
use vehicle_check::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    pub(crate) vehicle: RawVehicleRecord,
    pub(crate) mot_history: RawMotHistory,
    /// Reference date for validity and age calculations. Defaults to today.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn with_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/check/analyze", axum::routing::post(analyze_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn analyze_endpoint(
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<VehicleReport>, AppError> {
    let AnalyzeRequest {
        vehicle,
        mot_history,
        today,
    } = payload;

    let (snapshot, records) = normalize(&vehicle, &mot_history)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let report = HistoryAnalysisEngine::default().analyze(&snapshot, &records, today);

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use vehicle_check::engine::RiskLevel;

    fn sample_request(mot_tests: serde_json::Value) -> AnalyzeRequest {
        AnalyzeRequest {
            vehicle: serde_json::from_value(json!({
                "registration": "AB12 CDE",
                "make": "FORD",
                "fuelType": "PETROL",
                "yearOfManufacture": 2016,
                "co2Emissions": 120,
                "euroStatus": "Euro 6",
                "motStatus": "Valid",
                "motExpiryDate": "2026-03-14"
            }))
            .expect("vehicle payload deserializes"),
            mot_history: serde_json::from_value(json!({
                "registration": "AB12CDE",
                "motTests": mot_tests
            }))
            .expect("history payload deserializes"),
            today: NaiveDate::from_ymd_opt(2025, 6, 1),
        }
    }

    #[tokio::test]
    async fn analyze_endpoint_returns_a_full_report() {
        let request = sample_request(json!([
            {
                "completedDate": "2023-03-12",
                "testResult": "PASSED",
                "odometerValue": 40100,
                "odometerUnit": "MI",
                "odometerResultType": "READ"
            },
            {
                "completedDate": "2024-03-14",
                "testResult": "PASSED",
                "odometerValue": 47500,
                "odometerUnit": "MI",
                "odometerResultType": "READ"
            }
        ]));

        let Json(report) = analyze_endpoint(Json(request)).await.expect("analyzes");

        assert_eq!(report.registration, "AB12CDE");
        assert_eq!(report.mot_summary.total_tests, 2);
        assert!(!report.clocking_analysis.clocked);
        assert_eq!(report.condition_score, Some(100));
        assert_eq!(report.ulez_compliance.euro_standard, Some(6));
    }

    #[tokio::test]
    async fn analyze_endpoint_flags_a_clocked_vehicle() {
        let request = sample_request(json!([
            {
                "completedDate": "2023-03-12",
                "testResult": "PASSED",
                "odometerValue": 60000,
                "odometerUnit": "MI",
                "odometerResultType": "READ"
            },
            {
                "completedDate": "2024-03-14",
                "testResult": "PASSED",
                "odometerValue": 45000,
                "odometerUnit": "MI",
                "odometerResultType": "READ"
            }
        ]));

        let Json(report) = analyze_endpoint(Json(request)).await.expect("analyzes");

        assert!(report.clocking_analysis.clocked);
        assert_eq!(report.clocking_analysis.risk_level, RiskLevel::High);
    }

    #[tokio::test]
    async fn analyze_endpoint_rejects_a_payload_without_tests() {
        let mut request = sample_request(json!([]));
        request.mot_history = serde_json::from_value(json!({"registration": "AB12CDE"}))
            .expect("history payload deserializes");

        let error = analyze_endpoint(Json(request))
            .await
            .expect_err("absent test list should fail");
        assert!(matches!(error, AppError::Normalization(_)));
    }
}
