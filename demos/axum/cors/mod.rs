use std::sync::Arc;

use cors_gate::{Cors, CorsOptions, ValidationError};

pub type SharedCors = Arc<Cors>;

#[derive(Clone)]
pub struct AppState {
    pub cors: SharedCors,
    pub greeting: &'static str,
}

/// Default options: `*` origin, the default method list and mirrored
/// request headers.
pub fn build_state() -> Result<AppState, ValidationError> {
    let cors = Arc::new(Cors::new(CorsOptions::default())?);

    Ok(AppState {
        cors,
        greeting: "Welcome to the Axum CORS demo!",
    })
}

pub mod middleware;
