//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. La allowlist de admins vive dentro de la
//! configuración; el notificador se elige aquí según haya API de email
//! configurada o no.

use reqwest::Client;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::config::environment::EnvironmentConfig;
use crate::services::notification_service::{HttpEmailNotifier, NoopNotifier, Notifier};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub http_client: Client,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let http_client = Client::new();

        let notifier: Arc<dyn Notifier> =
            match (config.email_api_url.clone(), config.email_api_key.clone()) {
                (Some(url), Some(key)) => {
                    Arc::new(HttpEmailNotifier::new(http_client.clone(), url, key))
                }
                _ => {
                    info!("EMAIL_API_URL/EMAIL_API_KEY not set, invite emails are a no-op");
                    Arc::new(NoopNotifier)
                }
            };

        Self {
            pool,
            config,
            http_client,
            notifier,
        }
    }
}
