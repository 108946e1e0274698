//! Google OAuth 응답 모델
//!
//! Google은 계정 설정에 따라 일부 필드를 생략하므로 모든 필드를 선택값으로 받습니다.
//! 필수 여부 판단은 [`ProviderIdentity`](crate::domain::models::oauth::ProviderIdentity)로
//! 변환하는 쪽에서 합니다.

use serde::Deserialize;

/// `GET /oauth2/v2/userinfo` 응답
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    #[serde(default)]
    pub verified_email: bool,
}

/// `POST /token` 응답
#[derive(Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// 초 단위
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}
