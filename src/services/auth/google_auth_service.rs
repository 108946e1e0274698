//! Google OAuth 2.0 연동 서비스
//!
//! 두 가지 자격 증명을 처리합니다.
//!
//! - **액세스 토큰**: 프론트엔드(Google Identity Services)가 이미 받아 온 토큰.
//!   교환 없이 userinfo 조회로 바로 검증됩니다.
//! - **인가 코드**: 팝업 흐름(`redirect_uri = postmessage`)에서 받은 코드.
//!   토큰 엔드포인트에서 교환하며, Gmail 연결 시 refresh token을 얻는 유일한 경로입니다.
//!
//! ```text
//! Client ──code/token──▶ GoogleAuthService ──POST /token──▶ Google
//!                                │◀──────access/refresh──────┘
//!                                └──GET /userinfo (Bearer)──▶ Google
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use once_cell::sync::OnceCell;
use reqwest::{Client, RequestBuilder};

use crate::config::GoogleOAuthSettings;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::oauth::google_oauth_model::{GoogleTokenResponse, GoogleUserInfo};
use crate::domain::models::oauth::{OAuthCredential, ProviderIdentity, ProviderTokens};
use crate::services::auth::IdentityProvider;

/// 로그인 URL에 요청하는 스코프
///
/// Gmail 수집을 위해 `gmail.readonly`를 함께 요청합니다.
pub const GOOGLE_SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/gmail.readonly",
];

static GOOGLE_AUTH_SERVICE_INSTANCE: OnceCell<Arc<GoogleAuthService>> = OnceCell::new();

pub struct GoogleAuthService {
    http_client: Client,
    settings: GoogleOAuthSettings,
}

fn provider_error(context: &str, error: reqwest::Error) -> AppError {
    if error.is_timeout() {
        log::warn!("⏱️ Google {} 시간 초과", context);
        AppError::ValidationError(format!("Google OAuth error: {} timed out", context))
    } else {
        log::warn!("⚠️ Google {} 실패: {}", context, error);
        AppError::ValidationError(format!("Google OAuth error: {} failed", context))
    }
}

impl From<GoogleUserInfo> for ProviderIdentity {
    fn from(info: GoogleUserInfo) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            email: non_blank(info.email).map(|email| email.trim().to_lowercase()),
            external_id: non_blank(info.id),
            display_name: non_blank(info.name),
            avatar_url: non_blank(info.picture),
        }
    }
}

impl GoogleAuthService {
    pub fn instance() -> Arc<Self> {
        GOOGLE_AUTH_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(GoogleOAuthSettings::from_env())))
            .clone()
    }

    pub fn new(settings: GoogleOAuthSettings) -> Self {
        Self {
            http_client: Client::new(),
            settings,
        }
    }

    /// 모든 Google 요청은 `request_timeout`을 요청 단위로 적용합니다.
    fn token_request(&self, auth_code: &str) -> RequestBuilder {
        let params = [
            ("code", auth_code),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        self.http_client
            .post(&self.settings.token_uri)
            .timeout(self.settings.request_timeout)
            .form(&params)
    }

    fn userinfo_request(&self, access_token: &str) -> RequestBuilder {
        self.http_client
            .get(&self.settings.userinfo_uri)
            .timeout(self.settings.request_timeout)
            .bearer_auth(access_token)
    }

    /// Google 동의 화면 URL
    ///
    /// refresh token을 받기 위해 `access_type=offline`, `prompt=consent`를 붙입니다.
    pub fn get_login_url(&self, state: Option<&str>) -> String {
        let scope = GOOGLE_SCOPES.join(" ");
        let mut params = vec![
            ("client_id", self.settings.client_id.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ];
        if let Some(state) = state.filter(|s| !s.is_empty()) {
            params.push(("state", state));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.settings.auth_uri, query_string)
    }

    async fn exchange_code_for_token(&self, auth_code: &str) -> AppResult<GoogleTokenResponse> {
        let response = self
            .token_request(auth_code)
            .send()
            .await
            .map_err(|e| provider_error("token exchange", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("⚠️ Google 토큰 교환 거부 ({}): {}", status, error_text);
            return Err(AppError::ValidationError(
                "Google OAuth error: authorization code was rejected".to_string(),
            ));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| provider_error("token response", e))
    }
}

#[async_trait]
impl IdentityProvider for GoogleAuthService {
    async fn exchange(&self, credential: &OAuthCredential) -> AppResult<ProviderTokens> {
        match credential {
            OAuthCredential::AccessToken(token) => Ok(ProviderTokens {
                access_token: token.clone(),
                refresh_token: None,
                expires_at: None,
            }),
            OAuthCredential::AuthorizationCode(code) => {
                let response = self.exchange_code_for_token(code).await?;
                let access_token = response.access_token.ok_or_else(|| {
                    AppError::ValidationError("Google OAuth error: no access token returned".to_string())
                })?;

                Ok(ProviderTokens {
                    access_token,
                    refresh_token: response.refresh_token,
                    expires_at: response
                        .expires_in
                        .map(|seconds| Utc::now() + Duration::seconds(seconds)),
                })
            }
        }
    }

    async fn fetch_identity(&self, access_token: &str) -> AppResult<ProviderIdentity> {
        let response = self
            .userinfo_request(access_token)
            .send()
            .await
            .map_err(|e| provider_error("userinfo request", e))?;

        if !response.status().is_success() {
            let status = response.status();
            log::warn!("⚠️ Google 사용자 정보 조회 거부: {}", status);
            return Err(AppError::ValidationError(
                "Google OAuth error: token was rejected".to_string(),
            ));
        }

        let info = response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| provider_error("userinfo response", e))?;

        Ok(ProviderIdentity::from(info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GoogleOAuthSettings {
        GoogleOAuthSettings {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "postmessage".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_uri: "http://127.0.0.1:9/token".to_string(),
            userinfo_uri: "http://127.0.0.1:9/userinfo".to_string(),
            request_timeout: std::time::Duration::from_secs(1),
        }
    }

    #[test]
    fn test_login_url_requests_offline_access_and_gmail_scope() {
        let service = GoogleAuthService::new(settings());
        let url = service.get_login_url(Some("xyz"));

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains("state=xyz"));
        assert!(url.contains(&*urlencoding::encode("https://www.googleapis.com/auth/gmail.readonly")));
    }

    #[test]
    fn test_login_url_without_state() {
        let service = GoogleAuthService::new(settings());
        assert!(!service.get_login_url(None).contains("state="));
    }

    #[test]
    fn test_every_google_request_carries_timeout() {
        let service = GoogleAuthService::new(settings());
        let expected = std::time::Duration::from_secs(1);

        let token = service.token_request("4/code").build().unwrap();
        assert_eq!(token.timeout(), Some(&expected));

        let userinfo = service.userinfo_request("ya29.token").build().unwrap();
        assert_eq!(userinfo.timeout(), Some(&expected));
        assert_eq!(
            userinfo.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer ya29.token"
        );
    }

    #[test]
    fn test_userinfo_conversion_drops_blank_fields() {
        let identity = ProviderIdentity::from(GoogleUserInfo {
            id: Some("g-1".to_string()),
            email: Some(" Box@Gmail.com ".to_string()),
            name: Some("  ".to_string()),
            picture: None,
            verified_email: true,
        });

        assert_eq!(identity.email.as_deref(), Some("box@gmail.com"));
        assert_eq!(identity.external_id.as_deref(), Some("g-1"));
        assert!(identity.display_name.is_none());
    }

    #[actix_web::test]
    async fn test_access_token_is_used_without_exchange() {
        let service = GoogleAuthService::new(settings());
        let tokens = service
            .exchange(&OAuthCredential::AccessToken("ya29.token".to_string()))
            .await
            .unwrap();

        assert_eq!(tokens.access_token, "ya29.token");
        assert!(tokens.refresh_token.is_none());
    }

    #[actix_web::test]
    async fn test_unreachable_provider_maps_to_validation_error() {
        let service = GoogleAuthService::new(settings());
        let result = service.fetch_identity("ya29.token").await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
