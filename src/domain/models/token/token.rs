//! JWT 클레임과 토큰 쌍
//!
//! 액세스 토큰과 리프레시 토큰은 같은 [`UserClaims`]를 담습니다.
//! 클레임은 발급 시점의 사용자 상태로부터 매번 새로 만들어지므로
//! 토큰 갱신 후에는 항상 최신 역할/HR 정보/프로필 완성 여부가 반영됩니다.

use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::users::{HrType, User, UserRole};

/// 사용자 신원 클레임
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClaims {
    /// 사용자 ID (ObjectId hex)
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr_type: Option<HrType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub company_names: Vec<String>,
    pub is_profile_complete: bool,
}

impl UserClaims {
    /// 저장된 사용자로부터 클레임을 만듭니다. ID가 없는(저장 전) 사용자는 `None`.
    pub fn from_user(user: &User) -> Option<Self> {
        Some(Self {
            sub: user.id_string()?,
            email: user.email.clone(),
            role: user.role,
            provider: user.provider,
            hr_type: user.hr_type,
            company_name: user.company_name.clone(),
            agency_name: user.agency_name.clone(),
            company_names: user.company_names.clone(),
            is_profile_complete: user.is_profile_complete,
        })
    }
}

/// 서명되는 전체 페이로드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub user: UserClaims,
    /// 토큰마다 고유한 ID
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 만료까지 남은 초
    pub expires_in: i64,
    pub token_type: String,
}
