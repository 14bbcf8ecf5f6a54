use crate::models::inspection::{ErrorResponse, Ja4Request, Ja4sRequest};
use crate::services::errors::OperationError;
use crate::services::operations::{FingerprintReport, ja4_fingerprint, ja4s_fingerprint};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

fn fingerprint_response(kind: &str, result: Result<FingerprintReport, OperationError>) -> Response {
    match result {
        Ok(report) => {
            info!("{} fingerprint computed ({} values)", kind, report.len());
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            warn!("{} fingerprint failed: {}", kind, e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub async fn ja4_handler(Json(payload): Json<Ja4Request>) -> Response {
    let result = ja4_fingerprint(&payload.input, payload.input_format, payload.output);
    fingerprint_response("JA4", result)
}

pub async fn ja4s_handler(Json(payload): Json<Ja4sRequest>) -> Response {
    let result = ja4s_fingerprint(&payload.input, payload.input_format, payload.output);
    fingerprint_response("JA4S", result)
}
