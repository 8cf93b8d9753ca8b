use std::sync::Arc;

use cors_gate::{
    AllowedHeaders, Cors, CorsOptions, Origin, OriginMatcher, PatternError, ValidationError,
};
use thiserror::Error;

pub type SharedCors = Arc<Cors>;
pub type SharedAppState = Arc<AppState>;

#[derive(Clone)]
pub struct AppState {
    pub cors: SharedCors,
    pub greeting: &'static str,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Requests from `localhost`, `otherhost.com` or any `*.example.dev`
/// subdomain get their origin echoed back; everything else passes through
/// without CORS headers.
pub fn build_state() -> Result<SharedAppState, StateError> {
    let origin = Origin::list([
        OriginMatcher::exact("http://localhost:3000"),
        OriginMatcher::exact("https://otherhost.com"),
        OriginMatcher::pattern_str(r"^https://[a-z0-9-]+\.example\.dev$")?,
    ]);

    let options = CorsOptions::new()
        .origin(origin)
        .allowed_headers(AllowedHeaders::list(["Content-Type", "X-Requested-With"]))
        .exposed_headers("X-Request-Id")
        .credentials(true)
        .max_age(600);

    let cors = Arc::new(Cors::new(options)?);

    Ok(Arc::new(AppState {
        cors,
        greeting: "Welcome to the Hyper CORS demo!",
    }))
}

pub mod middleware;
