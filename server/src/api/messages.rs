//! Message API
//!
//! Synchronous counterpart of the message queue: post one message and
//! return where it landed.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use liner_common::PostResult;

use super::AppState;
use crate::relay::{validate::decode_post, RelayError};

/// Post a message to Slack.
/// POST /message
pub async fn post_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PostResult>, RelayError> {
    let req = decode_post(&body).inspect_err(|e| {
        tracing::warn!(error = %e, "Error parsing request body");
    })?;

    let result = state.dispatcher.post(&req).await.inspect_err(|e| {
        if e.is_client_error() {
            tracing::warn!(kind = e.kind(), error = %e, "Rejected message request");
        }
    })?;
    Ok(Json(result))
}

/// Any method other than POST on /message.
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
