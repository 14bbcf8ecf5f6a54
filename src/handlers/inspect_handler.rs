use crate::models::inspection::{ErrorResponse, ParseRequest, ParseResponse};
use crate::services::operations::parse_tls;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

pub async fn parse_handler(Json(payload): Json<ParseRequest>) -> Response {
    match parse_tls(&payload.input, payload.input_format) {
        Ok(records) => {
            info!("Parsed {} TLS records", records.len());
            (StatusCode::OK, Json(ParseResponse { records })).into_response()
        }
        Err(e) => {
            warn!("Parse request rejected: {}", e);
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

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
