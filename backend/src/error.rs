use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{ErrorCode, ErrorResponse};
use thiserror::Error;
use tracing::error;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Comic not found")]
    NotFound,
    #[error("Vote database error: {0}")]
    Store(#[from] StoreError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn code(&self) -> ErrorCode {
        match self {
            ApiError::NotFound => ErrorCode::NotFound,
            ApiError::Store(_) | ApiError::Internal(_) => ErrorCode::SystemError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let code = self.code();
        let message = match code {
            ErrorCode::NotFound => self.to_string(),
            _ => {
                error!("{} {} failed: {}", req.method(), req.uri(), self);
                "An internal server error occurred.".to_string()
            }
        };

        rocket::Response::build_from(Json(ErrorResponse::new(code, message)).respond_to(req)?)
            .status(Status::new(code.status()))
            .ok()
    }
}
