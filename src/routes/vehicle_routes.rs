use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleRowResponse};
use crate::dto::ApiResponse;
use crate::services::utc_today;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new().route("/", get(list_vehicles).post(create_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleRowResponse>>>, AppError> {
    let rows = state.fleet.list_rows(utc_today()).await?;
    Ok(Json(ApiResponse::success(rows)))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    state.fleet.register(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::message("Vehicle registered"))))
}
