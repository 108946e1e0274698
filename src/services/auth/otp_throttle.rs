//! OTP 재전송 제한
//!
//! OTP 발송 전에 호출되어 두 가지 한도를 검사합니다.
//!
//! - 쿨다운: 마지막 발송 후 60초 동안 재발송 금지 (`otp:cooldown:{email}`)
//! - 시간당 한도: 1시간에 최대 5회 (`otp:resend:{email}`, 첫 증가 시 만료 설정)
//!
//! 키 이름은 [`otp_service`](super::otp_service)가 정의합니다.
//! 발송이 실패하면 이번 기록을 되돌리므로, 전달되지 않은 OTP가 한도를 소모하지 않습니다.

use std::future::Future;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::caching::{redis::RedisClient, KeyValueStore};
use crate::config::OtpConfig;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{ServiceLocator, ServiceRegistration};
use crate::services::auth::otp_service::{cooldown_key, resend_count_key};
use crate::utils::string_utils::normalize_email;

const RESEND_WINDOW_SECONDS: u64 = 60 * 60;

static OTP_THROTTLE_INSTANCE: OnceCell<Arc<OtpThrottle>> = OnceCell::new();

pub struct OtpThrottle {
    store: Arc<dyn KeyValueStore>,
}

impl OtpThrottle {
    pub fn instance() -> Arc<Self> {
        OTP_THROTTLE_INSTANCE
            .get_or_init(|| {
                let store: Arc<dyn KeyValueStore> = ServiceLocator::get::<RedisClient>();
                Arc::new(Self::new(store))
            })
            .clone()
    }

    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// 발송 가능 여부를 확인하고, 가능하면 이번 발송을 기록합니다.
    ///
    /// # Errors
    ///
    /// 쿨다운 중이거나 시간당 한도를 넘으면 `TooManyRequests`
    pub async fn check_and_record(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email);
        let cooldown = cooldown_key(&email);

        if self.store.exists(&cooldown).await? {
            let wait = self.store
                .ttl(&cooldown)
                .await?
                .unwrap_or(OtpConfig::RESEND_COOLDOWN_SECONDS);
            log::warn!("⏳ OTP 재전송 쿨다운: {} ({}초)", email, wait);
            return Err(AppError::TooManyRequests(format!(
                "Please wait {} seconds before requesting a new OTP",
                wait
            )));
        }

        let counter = resend_count_key(&email);
        let count = self.store.increment(&counter).await?;
        if count == 1 {
            self.store.expire(&counter, RESEND_WINDOW_SECONDS).await?;
        }
        if count > OtpConfig::MAX_RESENDS_PER_HOUR {
            log::warn!("🚫 OTP 시간당 발송 한도 초과: {}", email);
            return Err(AppError::TooManyRequests(
                "Too many OTP requests. Please try again later".to_string(),
            ));
        }

        self.store
            .set(&cooldown, "1", Some(OtpConfig::RESEND_COOLDOWN_SECONDS))
            .await
    }

    /// `check_and_record`가 남긴 쿨다운과 발송 횟수를 되돌립니다.
    pub async fn release(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email);
        self.store.delete(&cooldown_key(&email)).await?;

        let counter = resend_count_key(&email);
        if self.store.exists(&counter).await? && self.store.decrement(&counter).await? <= 0 {
            self.store.delete(&counter).await?;
        }
        Ok(())
    }

    /// 한도를 검사한 뒤 `send`를 실행합니다. `send`가 실패하면 이번 기록을 되돌립니다.
    ///
    /// ```rust,ignore
    /// let issued = OtpThrottle::instance()
    ///     .throttled(&email, OtpService::instance().issue(&email))
    ///     .await?;
    /// ```
    pub async fn throttled<T, F>(&self, email: &str, send: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.check_and_record(email).await?;

        match send.await {
            Ok(value) => Ok(value),
            Err(e) => {
                if let Err(release_error) = self.release(email).await {
                    log::warn!("⚠️ OTP 발송 기록 복구 실패: {} ({})", email, release_error);
                }
                Err(e)
            }
        }
    }
}

fn otp_throttle_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(OtpThrottle::instance())
}

inventory::submit! {
    ServiceRegistration {
        name: "otp_throttle",
        constructor: otp_throttle_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OtpSettings;
    use crate::services::auth::OtpService;
    use crate::testing::{FakeMailTransport, InMemoryKeyValueStore};

    fn throttle() -> (OtpThrottle, Arc<InMemoryKeyValueStore>) {
        let store = Arc::new(InMemoryKeyValueStore::default());
        (OtpThrottle::new(store.clone()), store)
    }

    #[actix_web::test]
    async fn test_first_request_sets_cooldown() {
        let (throttle, store) = throttle();

        throttle.check_and_record("A@x.com").await.unwrap();

        assert!(store.contains("otp:cooldown:a@x.com"));
        assert_eq!(store.raw("otp:resend:a@x.com").as_deref(), Some("1"));
        assert!(store.ttl("otp:resend:a@x.com").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_second_request_within_cooldown_is_rejected() {
        let (throttle, _) = throttle();
        throttle.check_and_record("a@x.com").await.unwrap();

        let err = throttle.check_and_record("a@x.com").await.unwrap_err();
        assert!(matches!(err, AppError::TooManyRequests(_)));
        assert!(err.to_string().starts_with("Please wait"));
    }

    #[actix_web::test]
    async fn test_hourly_cap() {
        let (throttle, store) = throttle();

        for _ in 0..5 {
            throttle.check_and_record("a@x.com").await.unwrap();
            store.expire_now("otp:cooldown:a@x.com");
        }

        let err = throttle.check_and_record("a@x.com").await.unwrap_err();
        assert_eq!(err.to_string(), "Too many OTP requests. Please try again later");
        assert!(!store.contains("otp:cooldown:a@x.com"));
    }

    #[actix_web::test]
    async fn test_failed_send_does_not_consume_limits() {
        let (throttle, store) = throttle();
        let otp = OtpService::new(
            store.clone(),
            Arc::new(FakeMailTransport::failing()),
            OtpSettings {
                template_id: "otp-template".to_string(),
                ..OtpSettings::default()
            },
        );

        for _ in 0..6 {
            let err = throttle.throttled("a@x.com", otp.issue("a@x.com")).await.unwrap_err();
            assert!(matches!(err, AppError::ExternalServiceError(_)));
        }

        assert!(!store.contains("otp:cooldown:a@x.com"));
        assert!(!store.contains("otp:resend:a@x.com"));
        assert!(throttle.check_and_record("a@x.com").await.is_ok());
    }

    #[actix_web::test]
    async fn test_successful_send_keeps_cooldown() {
        let (throttle, store) = throttle();

        let value = throttle.throttled("a@x.com", async { Ok(7) }).await.unwrap();

        assert_eq!(value, 7);
        assert!(store.contains("otp:cooldown:a@x.com"));
        assert_eq!(store.raw("otp:resend:a@x.com").as_deref(), Some("1"));
    }

    #[actix_web::test]
    async fn test_release_keeps_earlier_sends_counted() {
        let (throttle, store) = throttle();
        throttle.check_and_record("a@x.com").await.unwrap();
        store.expire_now("otp:cooldown:a@x.com");
        throttle.check_and_record("a@x.com").await.unwrap();

        throttle.release("a@x.com").await.unwrap();

        assert_eq!(store.raw("otp:resend:a@x.com").as_deref(), Some("1"));
        assert!(store.ttl("otp:resend:a@x.com").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_limits_are_per_email() {
        let (throttle, _) = throttle();
        throttle.check_and_record("a@x.com").await.unwrap();
        assert!(throttle.check_and_record("b@x.com").await.is_ok());
    }
}
