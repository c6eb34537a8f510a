//! Admission middleware for gated pages.
//!
//! Runs the access gate before the handler and, on success, stores the
//! admitted [`Identity`](crate::identity::Identity) in request extensions.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::AppState;
use crate::gate;

pub async fn require_admission(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = state.identity.identify(request.headers());
    match gate::admit(identity, state.data.as_ref()).await.into_identity() {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(redirect) => redirect.into_response(),
    }
}
