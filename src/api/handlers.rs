//! Core HTTP handlers

use axum::{extract::State as AxumState, response::IntoResponse};

use crate::SharedState;

/// Root health check endpoint
pub async fn root(AxumState(state): AxumState<SharedState>) -> impl IntoResponse {
    format!(
        "cdw_planner {} - watching {}/{}",
        env!("CARGO_PKG_VERSION"),
        state.config.github.owner,
        state.config.github.repo
    )
}
