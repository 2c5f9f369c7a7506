//! Webhook handler for GitHub push events

use axum::{
    body::Bytes,
    extract::State as AxumState,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info, warn};

use crate::SharedState;
use crate::error::PlannerError;
use crate::event::render_workshops_html;
use crate::planner::LookupResult;
use crate::utils::verify_github_signature;

/// Handles the GitHub webhook POST request.
///
/// Operations are published before responding; plan files are read in a
/// background task so GitHub gets its answer right away.
pub async fn handle_webhook(
    AxumState(state): AxumState<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Ping and other events carry no commits
    let event_opt = headers.get("X-GitHub-Event").and_then(|v| v.to_str().ok());
    if matches!(event_opt, Some(event) if event != "push") {
        info!("Not push event; Received {:?} event", event_opt);
        return StatusCode::NO_CONTENT.into_response();
    }

    let github = &state.config.github;
    if github.needs_webhook_secret() {
        let Some(signature) = headers
            .get("X-Hub-Signature-256")
            .and_then(|v| v.to_str().ok())
        else {
            error!("Webhook secret required, but no signature header supplied.");
            return StatusCode::UNAUTHORIZED.into_response();
        };
        if !github.has_valid_secret() {
            error!("Webhook secret required, but none was configured.");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        let secret = github.webhook_secret.as_deref().unwrap_or_default();
        if !verify_github_signature(secret, &body, signature) {
            error!("Signature verification failed!");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    let pending = match state.planner.publish(&body, state.sink.as_ref()) {
        Ok(pending) => pending,
        Err(e @ PlannerError::MalformedPayload(_)) => {
            warn!("Rejecting webhook: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
        Err(e) => {
            error!("Failed to publish operations: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let shared_state = state.clone();
    tokio::spawn(async move {
        let results = shared_state.planner.resolve(pending).await;
        log_lookup_results(&results);
    });

    StatusCode::ACCEPTED.into_response()
}

fn log_lookup_results(results: &[LookupResult]) {
    for result in results {
        match result.event_document() {
            Some(Ok(document)) => match render_workshops_html(&document.workshops) {
                Ok(html) => {
                    info!(
                        "Event {} at '{}' with {} workshop(s)",
                        document.date,
                        document.location,
                        document.workshops.len()
                    );
                    debug!("Workshop HTML for {}:{}", document.date, html);
                }
                Err(e) => warn!(
                    "Could not render workshops of '{}': {}",
                    result.folder_info.full_folder, e
                ),
            },
            Some(Err(e)) => warn!(
                "No event for '{}': {}",
                result.folder_info.full_folder, e
            ),
            // Failure already logged by the planner
            None => {}
        }
    }
}
