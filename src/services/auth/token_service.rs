//! JWT 토큰 서비스
//!
//! HS256으로 서명한 액세스/리프레시 토큰 쌍을 발급하고 검증합니다.
//!
//! - 액세스 토큰: 15분 (`JWT_ACCESS_EXPIRATION_MINUTES`)
//! - 리프레시 토큰: 7일 (`JWT_REFRESH_EXPIRATION_DAYS`)
//!
//! 두 토큰은 같은 사용자 클레임을 담고 `jti`로 구분됩니다. 갱신 시에는 토큰의 클레임을
//! 재사용하지 않고 사용자 저장소에서 다시 읽어 만듭니다. 그래서 역할이나 프로필이 바뀐
//! 사용자는 다음 갱신부터 새 클레임을 받습니다.
//!
//! 서버 측 폐기 목록은 없습니다. 리프레시 토큰은 만료 전까지 유효합니다.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::core::registry::{ServiceLocator, ServiceRegistration};
use crate::domain::models::token::{TokenClaims, TokenPair, UserClaims};
use crate::repositories::{UserRepository, UserStore};
use crate::utils::string_utils::parse_object_id;

const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

static TOKEN_SERVICE_INSTANCE: OnceCell<Arc<TokenService>> = OnceCell::new();

pub struct TokenService {
    users: Arc<dyn UserStore>,
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn instance() -> Arc<Self> {
        TOKEN_SERVICE_INSTANCE
            .get_or_init(|| {
                let users: Arc<dyn UserStore> = ServiceLocator::get::<UserRepository>();
                Arc::new(Self::new(users, JwtSettings::from_env()))
            })
            .clone()
    }

    pub fn new(users: Arc<dyn UserStore>, settings: JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());
        Self {
            users,
            settings,
            encoding_key,
            decoding_key,
        }
    }

    fn sign(&self, claims: &UserClaims, ttl: chrono::Duration) -> AppResult<String> {
        let now = Utc::now();
        let payload = TokenClaims {
            user: claims.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .context("JWT 토큰 생성 실패")
    }

    /// 액세스/리프레시 토큰 쌍을 발급합니다.
    pub fn issue(&self, claims: &UserClaims) -> AppResult<TokenPair> {
        let access_token = self.sign(claims, self.settings.access_ttl)?;
        let refresh_token = self.sign(claims, self.settings.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.settings.access_ttl.num_seconds(),
            token_type: "Bearer".to_string(),
        })
    }

    /// 서명과 만료를 검증하고 사용자 클레임을 돌려줍니다.
    ///
    /// 실패 원인(서명 불일치, 만료, 형식 오류)은 구분하지 않고 같은 에러로 돌려줍니다.
    pub fn verify(&self, token: &str) -> AppResult<UserClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.user)
            .map_err(|e| {
                log::debug!("토큰 검증 실패: {:?}", e.kind());
                AppError::AuthenticationError(INVALID_TOKEN_MESSAGE.to_string())
            })
    }

    /// 리프레시 토큰으로 새 토큰 쌍을 발급합니다.
    ///
    /// # Errors
    ///
    /// * 토큰이 유효하지 않으면 `AuthenticationError`
    /// * 토큰의 사용자가 더 이상 없으면 `NotFound`
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.verify(refresh_token)?;
        let user_id = parse_object_id(&claims.sub, "token subject")
            .map_err(|_| AppError::AuthenticationError(INVALID_TOKEN_MESSAGE.to_string()))?;

        // 캐시가 남아 있어도 저장된 최신 상태로 클레임을 만들도록
        let user = self.users
            .find_by_id_uncached(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let fresh_claims = UserClaims::from_user(&user)
            .ok_or_else(|| AppError::InternalError("Stored user has no id".to_string()))?;

        log::debug!("🔄 토큰 갱신: {}", user.email);
        self.issue(&fresh_claims)
    }

    /// `Authorization` 헤더 값에서 Bearer 토큰을 꺼냅니다.
    pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("Missing or malformed authorization header".to_string()))
    }
}

fn token_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(TokenService::instance())
}

inventory::submit! {
    ServiceRegistration {
        name: "token_service",
        constructor: token_service_constructor,
    }
}
