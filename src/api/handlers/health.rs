use axum::Json;
use serde::Serialize;

use crate::api::response::CommonResponse;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<CommonResponse<HealthResponse>> {
    CommonResponse::success(
        "OK",
        HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}
