use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{AuthProvider, PlanType};
use crate::domain::entities::users::{HrType, User, UserRole};
use crate::domain::models::token::TokenPair;
use crate::utils::time_utils::to_utc;

/// 사용자 응답 DTO
///
/// `password_hash`는 어떤 경로로도 포함되지 않습니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_type: Option<HrType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub company_names: Vec<String>,
    pub plan_type: PlanType,
    pub is_email_verified: bool,
    pub is_profile_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            provider: user.provider,
            avatar: user.avatar.clone(),
            hr_type: user.hr_type,
            company_name: user.company_name.clone(),
            agency_name: user.agency_name.clone(),
            company_names: user.company_names.clone(),
            plan_type: user.plan_type,
            is_email_verified: user.is_email_verified,
            is_profile_complete: user.is_profile_complete,
            last_login_at: user.last_login_at.map(to_utc),
            created_at: to_utc(user.created_at),
            updated_at: to_utc(user.updated_at),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// 로그인 결과: 사용자와 토큰 쌍
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: UserResponse,
    pub tokens: TokenPair,
}

impl AuthSession {
    pub fn new(user: &User, tokens: TokenPair) -> Self {
        Self {
            user: UserResponse::from(user),
            tokens,
        }
    }
}
