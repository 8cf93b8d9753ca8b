use std::error::Error;
use std::sync::Arc;

use cors_gate::{Cors, CorsConfig};

pub type SharedCors = Arc<Cors>;

const CONFIG: &str = r#"{
    "origin": "*",
    "expose": ["X-Total-Count"],
    "credentials": true,
    "maxAge": 600
}"#;

#[derive(Clone)]
pub struct AppState {
    pub cors: SharedCors,
    pub greeting: &'static str,
}

pub fn build_state() -> Result<AppState, Box<dyn Error + Send + Sync>> {
    let config: CorsConfig = serde_json::from_str(CONFIG)?;
    let cors = Arc::new(Cors::try_from(config)?);

    Ok(AppState {
        cors,
        greeting: "Welcome to the Actix Web CORS demo!",
    })
}

pub mod middleware;
