use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    routing::{get, post},
    Json, Router,
};

use crate::dto::charger_dto::{DispenserRequest, DispenserResponse, NoteRequest, ScanRequest, SessionResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::normalize_qr;

pub fn create_charger_router() -> Router<AppState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/scanner/open", post(open_scanner))
        .route("/scanner/close", post(close_scanner))
        .route("/scan", post(scan))
        .route("/reject", post(reject_match))
        .route("/confirm", post(confirm_match))
        .route("/reset", post(reset))
        .route("/dispenser", post(open_dispenser))
        .route("/note", post(submit_note))
}

async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.charger.session().await.into())
}

async fn open_scanner(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.charger.open_scanner().await.into())
}

async fn close_scanner(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.charger.close_scanner().await.into())
}

// Un QR vacío o demasiado largo nunca llega al backend
async fn scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let qr = normalize_qr(&request.qr)
        .ok_or_else(|| bad_request_error("QR payload must be 1-255 non-blank characters"))?;
    Ok(Json(state.charger.scan(&qr).await.into()))
}

async fn reject_match(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.charger.reject_match().await.into())
}

async fn confirm_match(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.charger.confirm_match().await.into())
}

async fn reset(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.charger.reset().await.into())
}

// Solo un cuerpo vacío usa el dispensador por defecto; un cuerpo presente
// debe ser JSON válido o la apertura se rechaza
fn parse_dispenser_request(headers: &HeaderMap, body: &[u8]) -> Result<DispenserRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DispenserRequest::default());
    }

    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if !is_json {
        return Err(bad_request_error("Expected request with `Content-Type: application/json`"));
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid dispenser request: {}", e)))
}

async fn open_dispenser(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DispenserResponse>, AppError> {
    let request = parse_dispenser_request(&headers, &body)?;
    let (dispenser, outcome) = state.charger.open_dispenser(request.dispenser_number).await?;
    Ok(Json(DispenserResponse::new(dispenser, &outcome)))
}

async fn submit_note(
    State(state): State<AppState>,
    Json(request): Json<NoteRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.charger.submit_note(&request.note).await?;
    Ok(Json(ApiResponse::message("Note Added")))
}
