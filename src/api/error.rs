use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Request-level failures. Client mistakes keep their user-facing message;
/// remote store failures carry a fixed public message and the underlying
/// error, which is logged but never sent to the client.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("🚫 Only image files are allowed.")]
    UnsupportedMedia,

    #[error("🚫 You can only upload up to {0} images.")]
    QuotaExceeded(u32),

    #[error("Request body exceeds the maximum allowed limit")]
    PayloadTooLarge,

    #[error("{public}")]
    Storage {
        public: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMedia => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Storage { source, .. } => {
                tracing::error!("Storage error: {:?}", source);
                StatusCode::BAD_GATEWAY
            }
        };

        (status, self.to_string()).into_response()
    }
}
