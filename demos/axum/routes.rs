use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::cors::AppState;

pub async fn greet(State(state): State<AppState>) -> impl IntoResponse {
    Html(format!(
        "<h1>{}</h1><p>Every origin is allowed; preflights echo the requested headers.</p>",
        state.greeting
    ))
}
