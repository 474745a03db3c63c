//! Canal de notificaciones
//!
//! Envío de emails tras un trait para poder inyectar un no-op en tests y
//! desarrollo. Desde el punto de vista de los llamadores es fire-and-forget:
//! un fallo se loguea y nunca tumba el cambio de estado que acompaña.

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::utils::errors::AppError;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

/// Notificador real: POST JSON contra un API de email HTTP
pub struct HttpEmailNotifier {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpEmailNotifier {
    pub fn new(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl Notifier for HttpEmailNotifier {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Email API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Email API returned status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Notificador no-op para desarrollo y tests
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_email(&self, to: &str, subject: &str, _body: &str) -> Result<(), AppError> {
        info!("Email (noop) to {}: {}", to, subject);
        Ok(())
    }
}
