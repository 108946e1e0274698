use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::gmail::{GmailAccount, GmailAccountStatus};
use crate::utils::time_utils::to_utc;

/// 토큰이 제거된 Gmail 계정 응답
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GmailAccountView {
    pub id: String,
    pub email: String,
    pub status: GmailAccountStatus,
    pub is_primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&GmailAccount> for GmailAccountView {
    fn from(account: &GmailAccount) -> Self {
        Self {
            id: account.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: account.email.clone(),
            status: account.status,
            is_primary: account.is_primary,
            last_synced_at: account.last_synced_at.map(to_utc),
            error_message: account.error_message.clone(),
            created_at: to_utc(account.created_at),
            updated_at: to_utc(account.updated_at),
        }
    }
}
