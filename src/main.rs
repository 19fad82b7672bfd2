use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use fleet_management::config::environment::EnvironmentConfig;
use fleet_management::database::DatabaseConnection;
use fleet_management::middleware::cors::cors_middleware;
use fleet_management::routes;
use fleet_management::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚛 Gestión de Flota y Multas - API REST");
    info!("========================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();
    let config = EnvironmentConfig::default();
    let port = config.port;
    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/driver", routes::driver_routes::create_driver_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/trip", routes::trip_routes::create_trip_router())
        .nest(
            "/api/maintenance",
            routes::maintenance_routes::create_maintenance_router(),
        )
        .nest("/api/fine", routes::fine_routes::create_fine_router())
        .nest("/api/reports", routes::report_routes::create_report_router())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🧑 Motoristas:");
    info!("   POST /api/driver - Registrar motorista");
    info!("   GET  /api/driver - Listar motoristas");
    info!("   GET  /api/driver/:id - Obtener motorista");
    info!("   PUT  /api/driver/:id - Actualizar motorista");
    info!("   DELETE /api/driver/:id - Eliminar motorista");
    info!("🚗 Vehículos:");
    info!("   POST /api/vehicle - Registrar vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("🛣  Viajes:");
    info!("   POST /api/trip - Registrar viaje (ajusta el contador)");
    info!("   POST /api/trip/import - Importar planilla CSV de viajes");
    info!("   GET  /api/trip - Listar viajes");
    info!("   PUT  /api/trip/:id - Actualizar viaje (conciliación diferencial)");
    info!("   DELETE /api/trip/:id - Eliminar viaje (revierte el delta)");
    info!("🔧 Mantenimientos:");
    info!("   POST /api/maintenance - Registrar mantenimiento");
    info!("   GET  /api/maintenance - Listar mantenimientos");
    info!("   PUT  /api/maintenance/:id - Actualizar mantenimiento");
    info!("   DELETE /api/maintenance/:id - Eliminar mantenimiento");
    info!("🧾 Multas:");
    info!("   POST /api/fine - Registrar multa");
    info!("   GET  /api/fine - Listar multas");
    info!("📊 Reportes:");
    info!("   GET  /api/reports/dashboard - Resumen y alertas");
    info!("   GET  /api/reports/fines-by-driver - Multas por motorista");
    info!("   GET  /api/reports/fines-by-vehicle - Multas por vehículo");
    info!("   GET  /api/reports/trips-by-driver - Viajes por motorista");
    info!("   GET  /api/reports/maintenance-by-vehicle - Mantenimientos por vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!("Error del servidor: {}", e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-management",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
