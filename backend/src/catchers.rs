use rocket::{Request, catch, serde::json::Json};
use shared::{ErrorCode, ErrorResponse};

#[catch(400)]
pub fn bad_request(req: &Request) -> Json<ErrorResponse> {
    let error_msg = match req.uri().path().segments().next() {
        Some("like") => "Could not determine who is voting.",
        _ => "Invalid request parameters.",
    };
    Json(ErrorResponse::new(ErrorCode::InvalidInput, error_msg))
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(ErrorCode::NotFound, "The requested resource was not found."))
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(ErrorCode::SystemError, "An internal server error occurred."))
}
