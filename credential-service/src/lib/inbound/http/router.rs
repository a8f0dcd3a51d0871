use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
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

use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::portfolio::all_holdings;
use super::handlers::portfolio::all_positions;
use super::handlers::protected::protected;
use super::handlers::signup::signup;
use super::middleware::authorize;
use crate::credential::ports::CredentialServicePort;
use crate::portfolio::ports::PortfolioServicePort;

#[derive(Clone)]
pub struct AppState {
    pub credential_service: Arc<dyn CredentialServicePort>,
    pub portfolio_service: Arc<dyn PortfolioServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    credential_service: Arc<dyn CredentialServicePort>,
    portfolio_service: Arc<dyn PortfolioServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        credential_service,
        portfolio_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/", get(health))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/allHoldings", get(all_holdings))
        .route("/allPositions", get(all_positions));

    let protected_routes = Router::new()
        .route("/protected", get(protected))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.authenticator),
            authorize,
        ));

    // Headers stay out of the span; they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
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
