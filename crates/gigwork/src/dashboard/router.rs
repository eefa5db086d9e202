use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::warn;

use super::controller::{DashboardController, SignOutOutcome};
use super::domain::SessionContext;
use super::repository::{AuthGateway, ProfileStore};

/// Router exposing the dashboard view-model and sign-out action.
pub fn dashboard_router<S, A>(controller: Arc<DashboardController<S, A>>) -> Router
where
    S: ProfileStore + 'static,
    A: AuthGateway + 'static,
{
    Router::new()
        .route("/api/v1/dashboard", get(dashboard_handler::<S, A>))
        .route("/api/v1/dashboard/sign-out", post(sign_out_handler::<S, A>))
        .with_state(controller)
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Turn request credentials into a session. Unknown or unverifiable tokens count as anonymous.
pub(crate) async fn resolve_session<A: AuthGateway + ?Sized>(
    auth: &A,
    headers: &HeaderMap,
) -> SessionContext {
    let Some(token) = bearer_token(headers) else {
        return SessionContext::anonymous();
    };

    match auth.current_user(&token).await {
        Ok(Some(user)) => SessionContext::authenticated(user, token),
        Ok(None) => SessionContext::anonymous(),
        Err(err) => {
            warn!(error = %err, "unable to resolve session, treating as anonymous");
            SessionContext::anonymous()
        }
    }
}

pub(crate) async fn dashboard_handler<S, A>(
    State(controller): State<Arc<DashboardController<S, A>>>,
    headers: HeaderMap,
) -> Response
where
    S: ProfileStore + 'static,
    A: AuthGateway + 'static,
{
    let session = resolve_session(controller.auth(), &headers).await;
    let render = controller.load(&session).await;
    (StatusCode::OK, Json(render)).into_response()
}

pub(crate) async fn sign_out_handler<S, A>(
    State(controller): State<Arc<DashboardController<S, A>>>,
    headers: HeaderMap,
) -> Response
where
    S: ProfileStore + 'static,
    A: AuthGateway + 'static,
{
    let mut session = resolve_session(controller.auth(), &headers).await;
    if session.access_token.is_none() {
        session.access_token = bearer_token(&headers);
    }
    let status = if session.access_token.is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::UNAUTHORIZED
    };

    let outcome = controller.sign_out(&session).await;
    let status = match outcome {
        SignOutOutcome::Navigate { .. } => StatusCode::OK,
        SignOutOutcome::Failed { .. } => status,
    };
    (status, Json(outcome)).into_response()
}
