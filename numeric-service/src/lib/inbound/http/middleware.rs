use axum::extract::Query;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use serde::Deserialize;

use crate::domain::identity::errors::AuthorizationError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Bearer token location: the `token` query parameter.
#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Authorization gate middleware.
///
/// Resolves the `token` query parameter to an [`AuthenticatedSubject`] and
/// stores it in request extensions. Runs before the handler extracts the
/// body, so rejected requests never reach the numeric operations.
///
/// [`AuthenticatedSubject`]: crate::domain::identity::models::AuthenticatedSubject
pub async fn require_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_query(&req);
    let result = match token {
        Some(token) => state.identity_service.authorize(&token).await,
        None => Err(AuthorizationError::MissingToken),
    };

    let subject = result.map_err(|e| {
        tracing::warn!(stage = e.stage(), error = %e, "Authorization rejected");
        ApiError::from(e)
    })?;

    tracing::debug!(subject = %subject.username(), "Authorization granted");
    req.extensions_mut().insert(subject);

    Ok(next.run(req).await)
}

fn extract_token_from_query(req: &Request) -> Option<String> {
    Query::<TokenQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(query)| query.token)
        .filter(|token| !token.is_empty())
}
