use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::common::ApiResponse;
use crate::dto::trip_dto::{
    CreateTripRequest, ImportSummaryResponse, TripListResponse, TripResponse, UpdateTripRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trip))
        .route("/", get(list_trips))
        .route("/import", post(import_trips))
        .route("/:id", get(get_trip))
        .route("/:id", put(update_trip))
        .route("/:id", delete(delete_trip))
}

async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripResponse>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_trips(
    State(state): State<AppState>,
) -> Result<Json<Vec<TripListResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

/// El cuerpo del request es la planilla CSV tal cual
async fn import_trips(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ApiResponse<ImportSummaryResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.import(&body).await?;
    Ok(Json(response))
}
