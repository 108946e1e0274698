//! Gmail 계정 엔티티
//!
//! 사용자에게 연결된 외부 메일함입니다. `(user_id, email)` 조합은 유일하며,
//! 삭제는 `status = Inactive`로의 소프트 전이입니다.
//!
//! 토큰 필드는 저장소에만 기록되고 API 응답에는 절대 포함되지 않습니다.
//! 응답에는 [`GmailAccountView`](crate::domain::dto::gmail::response::GmailAccountView)를 사용합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GmailAccountStatus {
    #[default]
    Active,
    Inactive,
    /// 동기화 실패. 외부 수집기가 설정합니다.
    Error,
}

impl GmailAccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GmailAccountStatus::Active => "active",
            GmailAccountStatus::Inactive => "inactive",
            GmailAccountStatus::Error => "error",
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GmailAccount {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub email: String,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expiry: Option<DateTime>,
    /// Google 사용자 ID
    pub provider_id: String,
    #[serde(default)]
    pub status: GmailAccountStatus,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

// 토큰이 로그에 남지 않도록 직접 구현
impl std::fmt::Debug for GmailAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GmailAccount")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("status", &self.status)
            .field("is_primary", &self.is_primary)
            .finish_non_exhaustive()
    }
}

impl GmailAccount {
    pub fn new(user_id: ObjectId, email: &str, provider_id: String, is_primary: bool) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id,
            email: email.trim().to_lowercase(),
            access_token: String::new(),
            refresh_token: None,
            token_expiry: None,
            provider_id,
            status: GmailAccountStatus::Active,
            is_primary,
            last_synced_at: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 재연결 시 토큰을 교체하고 활성 상태로 되돌립니다.
    pub fn reactivate(&mut self, access_token: String, refresh_token: Option<String>, token_expiry: Option<DateTime>) {
        self.access_token = access_token;
        // 재동의 없이 받은 응답에는 refresh token이 없을 수 있음
        if refresh_token.is_some() {
            self.refresh_token = refresh_token;
        }
        self.token_expiry = token_expiry;
        self.status = GmailAccountStatus::Active;
        self.error_message = None;
        self.updated_at = DateTime::now();
    }

    /// 소프트 삭제. 감사 목적으로 토큰은 남겨 둡니다.
    pub fn deactivate(&mut self) {
        self.status = GmailAccountStatus::Inactive;
        self.is_primary = false;
        self.updated_at = DateTime::now();
    }

    pub fn is_active(&self) -> bool {
        self.status == GmailAccountStatus::Active
    }

    pub fn is_connected(&self) -> bool {
        self.status != GmailAccountStatus::Inactive
    }
}
