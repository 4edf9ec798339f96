//! RFC 7807 problem documents returned by the JSON API.

use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

pub const PROBLEM_JSON: &str = "application/problem+json";

#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub instance: String,
}

impl ProblemDetails {
    pub fn new(
        status: StatusCode,
        detail: impl Into<String>,
        instance: impl Into<String>,
    ) -> Self {
        Self {
            kind: "about:blank",
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail: detail.into(),
            instance: instance.into(),
        }
    }
}

/// Build a response carrying a problem document.
pub fn problem_response(
    status: StatusCode,
    detail: impl Into<String>,
    instance: &str,
) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(PROBLEM_JSON)
        .json(ProblemDetails::new(status, detail, instance))
}

/// Turns query string deserialization failures into `400` problem documents.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let response = problem_response(StatusCode::BAD_REQUEST, err.to_string(), req.path());
    InternalError::from_response(err, response).into()
}
