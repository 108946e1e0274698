//! 인증 관련 설정
//!
//! 환경 변수 기반의 정적 접근자(`JwtConfig`, `GoogleOAuthConfig`, `OtpConfig`)와
//! 서비스가 시작 시 한 번 만들어 값으로 보관하는 읽기 전용 설정 구조체
//! (`JwtSettings`, `GoogleOAuthSettings`, `OtpSettings`)를 제공합니다.
//!
//! # 환경 변수
//!
//! | 변수 | 기본값 |
//! |------|--------|
//! | `JWT_SECRET` | 개발용 기본값 (경고 출력) |
//! | `JWT_ACCESS_EXPIRATION_MINUTES` | 15 |
//! | `JWT_REFRESH_EXPIRATION_DAYS` | 7 |
//! | `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` | 없음 (경고 출력) |
//! | `GOOGLE_REDIRECT_URI` | `postmessage` |
//! | `GOOGLE_REQUEST_TIMEOUT_SECS` | 10 |

use std::env;
use std::time::Duration;

fn env_or_warn(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        log::warn!("{} not set", key);
        String::new()
    })
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Google OAuth 2.0 설정
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub fn client_id() -> String {
        env_or_warn("GOOGLE_CLIENT_ID")
    }

    pub fn client_secret() -> String {
        env_or_warn("GOOGLE_CLIENT_SECRET")
    }

    /// 인가 코드 교환 시 사용하는 redirect URI
    ///
    /// 프론트엔드 팝업 흐름(Google Identity Services)에서는 `postmessage`를 사용합니다.
    pub fn redirect_uri() -> String {
        env::var("GOOGLE_REDIRECT_URI").unwrap_or_else(|_| "postmessage".to_string())
    }

    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".to_string())
    }

    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string())
    }

    pub fn request_timeout_secs() -> u64 {
        env_parse("GOOGLE_REQUEST_TIMEOUT_SECS", 10)
    }
}

/// JWT 설정
pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "hirebox-development-secret".to_string()
        })
    }

    pub fn access_expiration_minutes() -> i64 {
        env_parse("JWT_ACCESS_EXPIRATION_MINUTES", 15)
    }

    pub fn refresh_expiration_days() -> i64 {
        env_parse("JWT_REFRESH_EXPIRATION_DAYS", 7)
    }
}

/// OTP 정책 상수
pub struct OtpConfig;

impl OtpConfig {
    pub const CODE_LENGTH: u32 = 6;
    pub const EXPIRY_SECONDS: u64 = 10 * 60;
    pub const MAX_ATTEMPTS: u32 = 5;
    pub const RESEND_COOLDOWN_SECONDS: u64 = 60;
    pub const MAX_RESENDS_PER_HOUR: i64 = 5;
}

/// 토큰 서비스가 보관하는 읽기 전용 설정
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_ttl: chrono::Duration,
    pub refresh_ttl: chrono::Duration,
}

impl JwtSettings {
    pub fn from_env() -> Self {
        Self {
            secret: JwtConfig::secret(),
            access_ttl: chrono::Duration::minutes(JwtConfig::access_expiration_minutes()),
            refresh_ttl: chrono::Duration::days(JwtConfig::refresh_expiration_days()),
        }
    }
}

/// Google 연동 서비스가 보관하는 읽기 전용 설정
#[derive(Debug, Clone)]
pub struct GoogleOAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
    pub request_timeout: Duration,
}

impl GoogleOAuthSettings {
    pub fn from_env() -> Self {
        Self {
            client_id: GoogleOAuthConfig::client_id(),
            client_secret: GoogleOAuthConfig::client_secret(),
            redirect_uri: GoogleOAuthConfig::redirect_uri(),
            auth_uri: GoogleOAuthConfig::auth_uri(),
            token_uri: GoogleOAuthConfig::token_uri(),
            userinfo_uri: GoogleOAuthConfig::userinfo_uri(),
            request_timeout: Duration::from_secs(GoogleOAuthConfig::request_timeout_secs()),
        }
    }
}

/// OTP 엔진 설정
#[derive(Debug, Clone)]
pub struct OtpSettings {
    pub code_length: u32,
    pub expiry_seconds: u64,
    pub max_attempts: u32,
    /// 메일 템플릿 ID (`ZEPTOMAIL_OTP_TEMPLATE_ID`)
    pub template_id: String,
}

impl OtpSettings {
    pub fn from_env() -> Self {
        Self {
            template_id: crate::config::MailConfig::otp_template_id(),
            ..Self::default()
        }
    }
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            code_length: OtpConfig::CODE_LENGTH,
            expiry_seconds: OtpConfig::EXPIRY_SECONDS,
            max_attempts: OtpConfig::MAX_ATTEMPTS,
            template_id: String::new(),
        }
    }
}

/// 로그인 제공자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일 기반 (비밀번호 또는 OTP)
    #[default]
    Email,
    Google,
}

impl AuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "email" => Ok(AuthProvider::Email),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Email => "email",
            AuthProvider::Google => "google",
        }
    }
}
