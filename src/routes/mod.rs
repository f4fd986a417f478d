//! Rutas HTTP
//!
//! `/api/charger` expone la sesión del kiosco y `/api/vehicles` la tabla de
//! administración de la flota.

pub mod charger_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_for;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_for(&state.config);

    Router::new()
        .route("/health", get(health))
        .nest("/api/charger", charger_routes::create_charger_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
