use axum::extract::State;

use crate::{
    error::{ApiError, ErrorVerbosityProvider, NotFoundError},
    state::ApiState,
};

/// Fallback for requests that match no route.
pub async fn not_found(State(state): State<ApiState>) -> ApiError {
    tracing::debug!("No route matched");

    ApiError::NotFound(NotFoundError::new(state.error_verbosity()))
}
