use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================================================
// Common envelope
// ============================================================================

/// Body of every response: `{httpStatus, message, data}`.
/// `data` is `null` on errors.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonResponse<T> {
    pub data: Option<T>,
    pub http_status: u16,
    pub message: String,
}

impl<T: Serialize> CommonResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Json<CommonResponse<T>> {
        Json(CommonResponse {
            data: Some(data),
            http_status: StatusCode::OK.as_u16(),
            message: message.into(),
        })
    }
}

impl CommonResponse<()> {
    pub fn empty(
        status_code: StatusCode,
        message: impl Into<String>,
    ) -> (StatusCode, Json<CommonResponse<()>>) {
        (
            status_code,
            Json(CommonResponse {
                data: None,
                http_status: status_code.as_u16(),
                message: message.into(),
            }),
        )
    }
}

// ============================================================================
// Unified error type for handlers
// ============================================================================

/// Either a client failure (4xx) or a server error (5xx).
/// Used as the error type in handler and middleware Result returns.
#[derive(Debug)]
pub enum ApiError {
    Fail(StatusCode, String),
    Error(StatusCode, String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Fail(code, msg) => CommonResponse::empty(code, msg).into_response(),
            ApiError::Error(code, msg) => {
                tracing::error!(status = code.as_u16(), message = %msg, "Request failed");
                CommonResponse::empty(code, msg).into_response()
            }
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::BAD_REQUEST, message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::UNAUTHORIZED, message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::FORBIDDEN, message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Error(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }
}

// ============================================================================
// Extractors
// ============================================================================

/// JSON body extractor that answers malformed bodies with a 400 envelope.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "Invalid body request");
                Err(ApiError::bad_request("Invalid body request"))
            }
        }
    }
}
