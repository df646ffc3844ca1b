// bazaar_web/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use bazaar::{ErrorClass, MarketError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Marketplace Error: {0}")]
  Market(#[from] MarketError),
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
      AppError::Market(e) => match e.class() {
        ErrorClass::Input => StatusCode::BAD_REQUEST,
        ErrorClass::State if matches!(e, MarketError::Busy(_)) => StatusCode::CONFLICT,
        ErrorClass::MissingWallet | ErrorClass::Authorization | ErrorClass::State => StatusCode::SERVICE_UNAVAILABLE,
        ErrorClass::Call | ErrorClass::Revert => StatusCode::BAD_GATEWAY,
      },
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    let body = match self {
      AppError::Config(m) => json!({"error": "Configuration issue", "detail": m}),
      AppError::Market(e) => json!({"error": e.user_message(), "class": format!("{:?}", e.class())}),
    };
    HttpResponse::build(self.status_code()).json(body)
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
