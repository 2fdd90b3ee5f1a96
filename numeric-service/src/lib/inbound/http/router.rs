use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::average::average;
use super::handlers::binary_search::binary_search;
use super::handlers::bubble_sort::bubble_sort;
use super::handlers::filter_even::filter_even;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::max_value::max_value;
use super::handlers::register::register;
use super::handlers::sum_elements::sum_elements;
use super::middleware::require_token;
use crate::domain::identity::ports::IdentityServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
}

pub fn create_router(identity_service: Arc<dyn IdentityServicePort>) -> Router {
    let state = AppState { identity_service };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/login", post(login));

    let protected_routes = Router::new()
        .route("/bubble-sort", post(bubble_sort))
        .route("/filter-even", post(filter_even))
        .route("/sum-elements", post(sum_elements))
        .route("/max-value", post(max_value))
        .route("/binary-search", post(binary_search))
        .route("/average", post(average))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    // Only the path is logged: the query string carries the bearer token
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
