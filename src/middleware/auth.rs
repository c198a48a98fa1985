//! Auth gate layer: Authenticator で検証 → Principal を extensions に入れる

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Guard every route of `router` with the auth gate.
///
/// Uses `route_layer`, so unknown paths still answer 404 instead of 401.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, auth_gate))
}

async fn auth_gate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let principal = match state.gate.authenticate(req.headers()).await {
        Ok(principal) => principal,
        Err(denied) => {
            tracing::warn!(
                reason = %denied,
                method = %req.method(),
                path = %req.uri().path(),
                "request denied by auth gate"
            );
            return Err(denied.into());
        }
    };

    tracing::debug!(
        user_id = %principal.user_id,
        user_name = %principal.user_name,
        "request admitted"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
