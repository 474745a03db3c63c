use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rental_backend::config::environment::EnvironmentConfig;
use rental_backend::database::DatabaseConnection;
use rental_backend::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use rental_backend::routes::create_app_router;
use rental_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Rental Backend - reservas y disponibilidad");
    info!("=============================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    let cors = if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let port = config.port;
    let app_state = AppState::new(pool, config);

    let app = create_app_router(app_state).layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login");
    info!("🚗 Vehicle:");
    info!("   GET  /api/vehicle - Catálogo de vehículos");
    info!("   GET  /api/vehicle/:id - Detalle de vehículo");
    info!("   POST /api/vehicle - Crear vehículo (admin)");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo (admin)");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo (admin)");
    info!("📅 Booking:");
    info!("   POST /api/booking - Crear reserva");
    info!("   GET  /api/booking - Listar reservas (admin)");
    info!("   GET  /api/booking/:id - Detalle de reserva (admin)");
    info!("   PUT  /api/booking/:id/status - Cambiar estado (admin)");
    info!("✉️  Invite:");
    info!("   POST /api/invite - Crear invitación (admin)");
    info!("   GET  /api/invite - Listar invitaciones (admin)");
    info!("   POST /api/invite/accept - Aceptar invitación");
    info!("📊 Dashboard (admin):");
    info!("   GET  /api/dashboard/summary - Vista combinada");
    info!("   GET  /api/dashboard/active-bookings - Reservas activas hoy");
    info!("   GET  /api/dashboard/vehicles-out - Vehículos fuera hoy");
    info!("   GET  /api/dashboard/overdue - Reservas vencidas");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
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
