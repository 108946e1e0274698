//! OTP 엔진
//!
//! 이메일 하나에 살아 있는 OTP 레코드는 최대 하나입니다. 재전송하면 덮어쓰고,
//! 검증에 성공하거나 시도 횟수를 넘기면 즉시 삭제됩니다.
//!
//! # 키
//!
//! | 키 | 값 | TTL |
//! |----|----|-----|
//! | `otp:{email}` | [`OtpRecord`] JSON | 10분 |
//! | `otp:attempts:{email}` | 검증 시도 횟수 (INCR) | 레코드와 동일 |
//! | `otp:cooldown:{email}` | 재전송 쿨다운 표시 | 60초 ([`OtpThrottle`](super::OtpThrottle)) |
//! | `otp:resend:{email}` | 시간당 발송 횟수 | 1시간 ([`OtpThrottle`](super::OtpThrottle)) |
//!
//! 시도 횟수는 원자적 INCR로 올립니다. 같은 이메일로 동시에 들어온 검증 요청도
//! 각자 다른 횟수를 받으므로 한도를 넘겨 시도할 수 없습니다.
//! 검증 중에는 레코드를 다시 쓰지 않으므로, 소비된 레코드가 되살아나지 않습니다.

use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::OnceCell;
use rand::{rngs::OsRng, Rng};
use serde_json::json;

use crate::caching::{redis::RedisClient, KeyValueStore};
use crate::config::OtpSettings;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{ServiceLocator, ServiceRegistration};
use crate::domain::models::otp::{OtpIssued, OtpRecord, OtpVerified};
use crate::services::mail::{MailTransport, ZeptomailTransport};
use crate::utils::string_utils::normalize_email;

pub fn otp_key(email: &str) -> String {
    format!("otp:{}", email)
}

pub fn attempts_key(email: &str) -> String {
    format!("otp:attempts:{}", email)
}

pub fn cooldown_key(email: &str) -> String {
    format!("otp:cooldown:{}", email)
}

pub fn resend_count_key(email: &str) -> String {
    format!("otp:resend:{}", email)
}

static OTP_SERVICE_INSTANCE: OnceCell<Arc<OtpService>> = OnceCell::new();

pub struct OtpService {
    store: Arc<dyn KeyValueStore>,
    mail: Arc<dyn MailTransport>,
    settings: OtpSettings,
}

impl OtpService {
    pub fn instance() -> Arc<Self> {
        OTP_SERVICE_INSTANCE
            .get_or_init(|| {
                let store: Arc<dyn KeyValueStore> = ServiceLocator::get::<RedisClient>();
                let mail: Arc<dyn MailTransport> = ZeptomailTransport::instance();
                Arc::new(Self::new(store, mail, OtpSettings::from_env()))
            })
            .clone()
    }

    pub fn new(store: Arc<dyn KeyValueStore>, mail: Arc<dyn MailTransport>, settings: OtpSettings) -> Self {
        Self { store, mail, settings }
    }

    /// `[0, 10^len)` 구간에서 균등 추출한 뒤 0으로 채웁니다.
    fn generate_code(&self) -> String {
        let length = self.settings.code_length;
        let upper = 10u64.pow(length);
        let value = OsRng.gen_range(0..upper);
        format!("{:0width$}", value, width = length as usize)
    }

    async fn clear(&self, email: &str) -> AppResult<()> {
        self.store.delete(&otp_key(email)).await?;
        self.store.delete(&attempts_key(email)).await?;
        Ok(())
    }

    fn expired() -> AppError {
        AppError::OtpExpired("OTP expired or not found. Please request a new one".to_string())
    }

    fn attempts_exceeded() -> AppError {
        AppError::OtpAttemptsExceeded(
            "Maximum verification attempts exceeded. Please request a new OTP".to_string(),
        )
    }

    /// 새 OTP를 만들어 저장하고 메일로 보냅니다.
    ///
    /// 메일 발송이 실패하면 방금 저장한 레코드를 지우고 발송 에러를 돌려줍니다.
    pub async fn issue(&self, email: &str) -> AppResult<OtpIssued> {
        let email = normalize_email(email);
        let code = self.generate_code();
        let expiry = self.settings.expiry_seconds;

        let record = OtpRecord {
            code: code.clone(),
            email: email.clone(),
            attempts: 0,
            created_at: Utc::now().timestamp_millis(),
        };

        self.store.set_json(&otp_key(&email), &record, Some(expiry)).await?;
        self.store.set(&attempts_key(&email), "0", Some(expiry)).await?;

        if let Err(e) = self.mail
            .send_templated_email(&email, &self.settings.template_id, json!({ "otp": code }))
            .await
        {
            log::error!("❌ OTP 메일 발송 실패, 레코드 삭제: {} ({})", email, e);
            self.clear(&email).await?;
            return Err(e);
        }

        log::info!("📨 OTP 발송: {}", email);
        Ok(OtpIssued {
            success: true,
            expires_in_seconds: expiry,
        })
    }

    /// OTP를 검증합니다. 성공하면 레코드를 소비합니다.
    ///
    /// 시도 횟수는 `otp:attempts` 카운터만 기준으로 삼고 레코드는 다시 쓰지 않습니다.
    /// 레코드 삭제에 성공한 호출 하나만 성공을 돌려받습니다.
    ///
    /// # Errors
    ///
    /// * 레코드 없음/만료/이미 사용됨 → `OtpExpired`
    /// * 시도 횟수 초과 → `OtpAttemptsExceeded` (레코드 삭제됨)
    /// * 코드 불일치 → `InvalidOtp { remaining_attempts }`
    pub async fn verify(&self, email: &str, candidate: &str) -> AppResult<OtpVerified> {
        let email = normalize_email(email);
        let record_key = otp_key(&email);
        let counter_key = attempts_key(&email);
        let max_attempts = self.settings.max_attempts;

        let record: OtpRecord = self.store
            .get_json(&record_key)
            .await?
            .ok_or_else(Self::expired)?;

        let used = self.store
            .get(&counter_key)
            .await?
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(0);
        if used >= max_attempts {
            self.clear(&email).await?;
            log::warn!("🔒 OTP 시도 횟수 초과: {}", email);
            return Err(Self::attempts_exceeded());
        }

        let attempts = self.store.increment(&counter_key).await?;
        if attempts == 1 {
            // 카운터가 레코드보다 오래 남지 않도록
            match self.store.ttl(&record_key).await?.filter(|ttl| *ttl > 0) {
                Some(ttl) => self.store.expire(&counter_key, ttl).await?,
                None => {
                    // 읽은 뒤에 다른 요청이 소비했거나 만료됨
                    self.store.delete(&counter_key).await?;
                    return Err(Self::expired());
                }
            }
        }

        let attempts = u32::try_from(attempts).unwrap_or(u32::MAX);
        if attempts > max_attempts {
            self.clear(&email).await?;
            log::warn!("🔒 OTP 시도 횟수 초과: {}", email);
            return Err(Self::attempts_exceeded());
        }

        if record.code != candidate.trim() {
            let remaining = max_attempts - attempts;
            log::debug!("OTP 불일치: {} (남은 시도 {})", email, remaining);
            return Err(AppError::InvalidOtp {
                message: format!(
                    "Invalid OTP. {} attempt{} remaining",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                ),
                remaining_attempts: remaining,
            });
        }

        if !self.store.delete(&record_key).await? {
            log::warn!("OTP가 이미 사용됨: {}", email);
            return Err(Self::expired());
        }
        self.store.delete(&counter_key).await?;
        self.store.delete(&cooldown_key(&email)).await?;

        log::info!("✅ OTP 검증 성공: {}", email);
        Ok(OtpVerified { success: true, email })
    }

    /// 살아 있는 OTP가 있는지
    pub async fn exists(&self, email: &str) -> AppResult<bool> {
        self.store.exists(&otp_key(&normalize_email(email))).await
    }

    /// OTP 레코드를 버립니다.
    pub async fn discard(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email);
        self.clear(&email).await?;
        log::debug!("OTP 삭제: {}", email);
        Ok(())
    }
}

fn otp_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(OtpService::instance())
}

inventory::submit! {
    ServiceRegistration {
        name: "otp_service",
        constructor: otp_service_constructor,
    }
}
