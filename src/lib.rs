pub mod config;
pub mod db;
pub mod logging;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod seed;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::DbInitError;
use crate::state::AppState;

/// Opens the database, applies migrations, optionally seeds, and returns the
/// state the router runs on.
pub async fn init_state(config: &Config) -> Result<AppState, DbInitError> {
    let pool = db::connect(&config.db).await?;

    if config.seed_on_startup {
        seed::seed_demo_data(&pool).await?;
    }

    Ok(AppState::new(pool))
}

pub fn create_app(state: AppState, cors_origins: &[String]) -> axum::Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}
