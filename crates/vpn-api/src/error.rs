use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("An instance is already running in the {0} region. Please terminate it first")]
    AlreadyRunning(String),

    #[error("{0} is not a valid region")]
    InvalidRegion(String),

    #[error("Please set the LAUNCH_TEMPLATE_NAME environment variable first.")]
    MissingTemplate,

    #[error("Method not implemented")]
    NotImplemented,

    #[error("{0}")]
    Infra(#[from] vpn_infra::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::AlreadyRunning(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::InvalidRegion(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingTemplate => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            ApiError::Infra(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
