use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::{
    DashboardResponse, FinesByDriverRow, FinesByVehicleRow, MaintenanceByVehicleRow,
    TripsByDriverRow,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/fines-by-driver", get(fines_by_driver))
        .route("/fines-by-vehicle", get(fines_by_vehicle))
        .route("/trips-by-driver", get(trips_by_driver))
        .route("/maintenance-by-vehicle", get(maintenance_by_vehicle))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.dashboard().await?;
    Ok(Json(response))
}

async fn fines_by_driver(
    State(state): State<AppState>,
) -> Result<Json<Vec<FinesByDriverRow>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.fines_by_driver().await?;
    Ok(Json(response))
}

async fn fines_by_vehicle(
    State(state): State<AppState>,
) -> Result<Json<Vec<FinesByVehicleRow>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.fines_by_vehicle().await?;
    Ok(Json(response))
}

async fn trips_by_driver(
    State(state): State<AppState>,
) -> Result<Json<Vec<TripsByDriverRow>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.trips_by_driver().await?;
    Ok(Json(response))
}

async fn maintenance_by_vehicle(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaintenanceByVehicleRow>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.maintenance_by_vehicle().await?;
    Ok(Json(response))
}
