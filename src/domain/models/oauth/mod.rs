//! 외부 ID 제공자 모델
//!
//! 로그인 확인자와 Gmail 연결 서비스는 Google 구현에 직접 의존하지 않고
//! [`IdentityProvider`](crate::services::auth::IdentityProvider)를 통해 아래 타입만 주고받습니다.

use chrono::{DateTime, Utc};

pub mod google_oauth_model;

/// 제공자에 넘기는 자격 증명
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthCredential {
    /// 인가 코드. 토큰 엔드포인트에서 교환이 필요합니다.
    AuthorizationCode(String),
    /// 클라이언트가 이미 받아 온 액세스 토큰
    AccessToken(String),
}

/// 교환 결과 토큰
#[derive(Clone)]
pub struct ProviderTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for ProviderTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderTokens")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// 제공자가 돌려준 사용자 신원
///
/// 이메일과 외부 ID는 제공자가 생략할 수 있으므로 선택값입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderIdentity {
    pub email: Option<String>,
    pub external_id: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}
