//! Response construction.
//!
//! # Responsibilities
//! - Leave the caller's response at the framework default (empty 200)
//! - When relay is enabled, return the responder's status and body
//!
//! # Design Decisions
//! - Relay is opt-in; by default nothing from the upstream reaches the caller
//! - With relay on, a failed upstream exchange maps to 502 Bad Gateway

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::ocsp::{RelayError, TranslationOutcome, OCSP_RESPONSE_CONTENT_TYPE};

/// Build the caller's response for a translation result.
pub fn respond(result: Result<TranslationOutcome, RelayError>, relay_response: bool) -> Response {
    if !relay_response {
        return StatusCode::OK.into_response();
    }

    match result {
        Ok(TranslationOutcome::Forwarded(forwarded)) => {
            let content_type = forwarded
                .response
                .content_type
                .unwrap_or_else(|| HeaderValue::from_static(OCSP_RESPONSE_CONTENT_TYPE));
            let mut response = Response::new(Body::from(forwarded.response.body));
            *response.status_mut() = forwarded.response.status;
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
            response
        }
        Err(RelayError::Upstream(_)) => {
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
        _ => StatusCode::OK.into_response(),
    }
}
