//! Contact form submission handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{ContactRequest, StatusResponse};
use crate::app_state::AppState;
use crate::error::ContactError;

/// Public message returned once a submission is stored.
pub const SUCCESS_MESSAGE: &str =
    "Your message has been received and saved. We will get back to you soon!";

/// `POST /api/contact` — Submit the contact form.
///
/// # Errors
///
/// Returns [`ContactError`] on a malformed body, a missing required field,
/// or a storage failure. All of them render as `{"status": "error", ...}`.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    summary = "Submit the contact form",
    description = "Validates the submission and stores it as one row. `name`, `email` and `message` are required; `subject` is optional.",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message stored", body = StatusResponse),
        (status = 400, description = "Malformed body or missing required field", body = StatusResponse),
        (status = 500, description = "Message could not be stored", body = StatusResponse),
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ContactError> {
    tracing::info!("contact submission received");

    let request = parse_contact_request(payload)
        .inspect_err(|err| tracing::warn!(reason = %err, "contact request is not valid JSON"))?;

    state.contact_service.submit(request).await?;

    Ok(Json(StatusResponse::success(SUCCESS_MESSAGE)))
}

/// Contact routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact))
}

/// Turns the raw extractor result into a typed request.
///
/// The body must be a JSON object whose known keys are strings or `null`.
fn parse_contact_request(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<ContactRequest, ContactError> {
    let Json(value) = payload.map_err(|rej| ContactError::MalformedRequest(rej.body_text()))?;

    if !value.is_object() {
        return Err(ContactError::MalformedRequest(
            "expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ContactError::MalformedRequest(e.to_string()))
}
