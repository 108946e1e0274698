//! 환경, 서버, 비밀번호 해싱, 메일, 요청 제한 설정

use std::env;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` (없으면 `NODE_ENV`) 값으로 현재 환경을 판별합니다.
    /// 둘 다 없으면 가장 보수적인 `Production`으로 간주합니다.
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "production".to_string());
        Self::from_str(&raw)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

/// bcrypt 비용 설정
///
/// 배포 환경(staging, production)에서는 비용이 12 미만으로 내려가지 않습니다.
pub struct PasswordConfig;

impl PasswordConfig {
    pub const MIN_DEPLOYED_COST: u32 = 12;

    pub fn bcrypt_cost() -> u32 {
        let environment = Environment::current();
        let requested = env::var("BCRYPT_COST")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost));

        match requested {
            Some(cost) if environment.is_local() || cost >= Self::MIN_DEPLOYED_COST => cost,
            Some(cost) => {
                log::warn!(
                    "BCRYPT_COST={} is below {} for {:?}, ignoring",
                    cost,
                    Self::MIN_DEPLOYED_COST,
                    environment
                );
                Self::bcrypt_cost_for_env(&environment)
            }
            None => Self::bcrypt_cost_for_env(&environment),
        }
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development | Environment::Test => 4,
            Environment::Staging | Environment::Production => Self::MIN_DEPLOYED_COST,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// CORS 허용 Origin 목록 (`CORS_ORIGINS`, 쉼표 구분)
    pub fn cors_origins() -> Vec<String> {
        env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

/// 트랜잭션 메일(Zeptomail) 설정
pub struct MailConfig;

impl MailConfig {
    pub fn api_url() -> String {
        env::var("ZEPTOMAIL_API_URL")
            .unwrap_or_else(|_| "https://api.zeptomail.in/v1.1/email/template".to_string())
    }

    /// `Zoho-enczapikey ...` 형태의 인증 헤더 값
    pub fn api_key() -> String {
        env::var("ZEPTOMAIL_API_KEY").unwrap_or_else(|_| {
            log::warn!("ZEPTOMAIL_API_KEY not set, OTP mail delivery will fail");
            String::new()
        })
    }

    pub fn otp_template_id() -> String {
        env::var("ZEPTOMAIL_OTP_TEMPLATE_ID").unwrap_or_default()
    }

    pub fn from_email() -> String {
        env::var("FROM_EMAIL").unwrap_or_else(|_| "noreply@hirebox.com".to_string())
    }

    pub fn from_name() -> String {
        env::var("FROM_NAME").unwrap_or_else(|_| "Hirebox".to_string())
    }
}

/// 전역 요청 제한 (actix-governor)
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        Self { per_second, burst_size }
    }
}
