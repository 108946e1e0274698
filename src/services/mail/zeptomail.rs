//! Zeptomail 템플릿 메일 클라이언트

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;

use crate::config::MailConfig;
use crate::core::errors::{AppError, AppResult};
use crate::services::mail::MailTransport;

const REQUEST_TIMEOUT_SECS: u64 = 10;

static ZEPTOMAIL_TRANSPORT_INSTANCE: OnceCell<Arc<ZeptomailTransport>> = OnceCell::new();

#[derive(Debug, Deserialize)]
struct ZeptomailResponse {
    #[serde(default)]
    request_id: Option<String>,
}

pub struct ZeptomailTransport {
    http_client: Client,
    api_url: String,
    api_key: String,
    from_email: String,
    from_name: String,
}

impl ZeptomailTransport {
    pub fn instance() -> Arc<Self> {
        ZEPTOMAIL_TRANSPORT_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    MailConfig::api_url(),
                    MailConfig::api_key(),
                    MailConfig::from_email(),
                    MailConfig::from_name(),
                ))
            })
            .clone()
    }

    pub fn new(api_url: String, api_key: String, from_email: String, from_name: String) -> Self {
        Self {
            http_client: Client::new(),
            api_url,
            api_key,
            from_email,
            from_name,
        }
    }

    /// 요청마다 `REQUEST_TIMEOUT_SECS` 제한을 둡니다.
    fn send_request(&self, body: &serde_json::Value) -> RequestBuilder {
        self.http_client
            .post(&self.api_url)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
    }

    fn payload(&self, recipient: &str, template_id: &str, variables: serde_json::Value) -> serde_json::Value {
        json!({
            "template_key": template_id,
            "from": {
                "address": self.from_email,
                "name": self.from_name,
            },
            "to": [
                { "email_address": { "address": recipient, "name": "" } }
            ],
            "merge_info": variables,
        })
    }
}

#[async_trait]
impl MailTransport for ZeptomailTransport {
    async fn send_templated_email(
        &self,
        recipient: &str,
        template_id: &str,
        variables: serde_json::Value,
    ) -> AppResult<String> {
        if template_id.is_empty() {
            return Err(AppError::ExternalServiceError(
                "Mail template id is not configured".to_string(),
            ));
        }

        log::info!("📧 템플릿 메일 발송: {}", recipient);

        let response = self
            .send_request(&self.payload(recipient, template_id, variables))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Failed to send email: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ 메일 발송 실패 ({}): {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Failed to send email: provider responded with {}",
                status
            )));
        }

        let parsed: ZeptomailResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Invalid mail provider response: {}", e)))?;

        let message_id = parsed.request_id.unwrap_or_default();
        log::info!("✅ 메일 발송 완료: {} (message id: {})", recipient, message_id);
        Ok(message_id)
    }
}
