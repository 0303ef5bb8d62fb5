//! Route dispatch and per-endpoint handlers.
//!
//! All failures are converted to responses here; nothing escapes to
//! take the serve loop down.

use crate::api::response::{error_response, json_response, not_found, options_response};
use crate::api::{AppState, SERVICE_NAME};
use crate::domain::model::{ContactSubmission, OrderSubmission};
use crate::utils::error::RelayError;
use chrono::{SecondsFormat, Utc};
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    tracing::debug!(%method, %path, "request in");

    let response = match (&method, path.as_str()) {
        (&Method::GET, "/") => json_response(
            StatusCode::OK,
            &serde_json::json!({ "ok": true, "service": SERVICE_NAME }),
        ),
        (&Method::GET, "/api/ping") => json_response(
            StatusCode::OK,
            &serde_json::json!({
                "ok": true,
                "time": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            }),
        ),
        (&Method::GET, "/api/tg-selftest") => handle_selftest(&state).await,
        (&Method::POST, "/api/telegram-order") => handle_order(req, &state).await,
        (&Method::POST, "/api/contact") => handle_contact(req, &state).await,
        (&Method::OPTIONS, _) => options_response(),
        _ => not_found(),
    };

    tracing::debug!(%method, %path, status = %response.status(), "request out");
    Ok(response)
}

async fn handle_order(req: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    let bytes = match read_body(req).await {
        Ok(bytes) => bytes,
        Err(resp) => return resp,
    };
    let order: OrderSubmission = match serde_json::from_slice(&bytes) {
        Ok(order) => order,
        Err(e) => {
            tracing::debug!("undecodable order payload: {e}");
            return error_response(StatusCode::BAD_REQUEST, "Bad payload");
        }
    };

    match state.dispatcher.dispatch_order(&order).await {
        Ok(report) if report.all_ok() => {
            json_response(StatusCode::OK, &serde_json::json!({ "ok": true }))
        }
        Ok(report) => {
            tracing::warn!(attempts = report.outcomes.len(), "telegram send failed");
            json_response(
                StatusCode::BAD_GATEWAY,
                &serde_json::json!({
                    "ok": false,
                    "error": "telegram send failed",
                    "details": report.outcomes,
                }),
            )
        }
        Err(e) => order_error_response(&e, "Bad payload"),
    }
}

async fn handle_contact(req: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    let bytes = match read_body(req).await {
        Ok(bytes) => bytes,
        Err(resp) => return resp,
    };
    let contact: ContactSubmission = match serde_json::from_slice(&bytes) {
        Ok(contact) => contact,
        Err(e) => {
            tracing::debug!("undecodable contact payload: {e}");
            return error_response(StatusCode::BAD_REQUEST, "Missing fields");
        }
    };

    match state.dispatcher.dispatch_contact(&contact).await {
        Ok(report) if report.all_ok() => {
            json_response(StatusCode::OK, &serde_json::json!({ "ok": true }))
        }
        Ok(report) => json_response(
            StatusCode::BAD_GATEWAY,
            &serde_json::json!({
                "ok": false,
                "error": "telegram send failed",
                "details": report.outcomes,
            }),
        ),
        Err(e) => order_error_response(&e, "Missing fields"),
    }
}

async fn handle_selftest(state: &AppState) -> Response<Full<Bytes>> {
    match state.dispatcher.self_test().await {
        Ok(attempt) => json_response(
            StatusCode::OK,
            &serde_json::json!({
                "ok": attempt.tg_ok,
                "httpOk": attempt.http_ok,
                "body": attempt.body,
            }),
        ),
        Err(e) => order_error_response(&e, "Bad payload"),
    }
}

/// Map a dispatcher error to a response. `validation_message` differs
/// per endpoint ("Bad payload" vs "Missing fields").
fn order_error_response(e: &RelayError, validation_message: &str) -> Response<Full<Bytes>> {
    match e {
        RelayError::Validation { reason } => {
            tracing::debug!(reason = %reason, "payload rejected");
            error_response(StatusCode::BAD_REQUEST, validation_message)
        }
        RelayError::NotConfigured { message } => {
            tracing::warn!(detail = %message, "telegram not configured");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Telegram not configured")
        }
        other => {
            tracing::error!("handler error: {other}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

async fn read_body(req: Request<Incoming>) -> Result<Bytes, Response<Full<Bytes>>> {
    let body = Limited::new(req.into_body(), MAX_BODY_BYTES);
    match body.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            tracing::warn!("failed to read request body: {e}");
            Err(error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Payload too large",
            ))
        }
    }
}
