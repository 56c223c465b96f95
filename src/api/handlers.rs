use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::server::AppState;
use crate::error::QueueError;
use crate::queue::{Change, Snapshot};

#[derive(Deserialize)]
pub struct NamePayload {
    pub name: String,
}

#[derive(Serialize)]
pub struct PositionResponse {
    pub position: Option<usize>,
}

#[derive(Serialize)]
pub struct RoomsResponse {
    pub rooms: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for QueueError {
    fn into_response(self) -> Response {
        let status = match self {
            QueueError::InvalidInput => StatusCode::BAD_REQUEST,
            QueueError::UnknownRoom(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<RoomsResponse> {
    Json(RoomsResponse {
        rooms: state.registry.list_rooms().to_vec(),
    })
}

pub async fn queue(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<Snapshot>, QueueError> {
    state.registry.snapshot(&room).await.map(Json)
}

pub async fn position(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    Query(query): Query<NamePayload>,
) -> Result<Json<PositionResponse>, QueueError> {
    let position = state.registry.position(&room, &query.name).await?;
    Ok(Json(PositionResponse { position }))
}

pub async fn join(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    Json(payload): Json<NamePayload>,
) -> Result<Json<Change>, QueueError> {
    state.registry.join(&room, &payload.name).await.map(Json)
}

pub async fn leave(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    Json(payload): Json<NamePayload>,
) -> Result<Json<Change>, QueueError> {
    state.registry.leave(&room, &payload.name).await.map(Json)
}
