//! 키-값 저장소 추상화
//!
//! OTP 레코드, 시도 횟수 카운터, 재전송 쿨다운/시간당 카운터가 이 trait 위에서 동작합니다.
//! TTL 기반 만료가 OTP 수명을 결정하므로 구현체는 TTL을 정확히 지켜야 합니다.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::core::errors::{AppError, AppResult};

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// `ttl_seconds`가 `Some`이면 해당 시간 후 만료됩니다.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> AppResult<()>;

    /// 키를 지우고, 실제로 지운 키가 있었는지 돌려줍니다.
    ///
    /// 같은 키를 동시에 지우면 정확히 한 호출만 `true`를 받습니다.
    async fn delete(&self, key: &str) -> AppResult<bool>;

    /// 원자적으로 1 증가시킨 값을 반환합니다. 키가 없으면 0에서 시작합니다.
    /// 기존 TTL은 유지됩니다.
    async fn increment(&self, key: &str) -> AppResult<i64>;

    /// 원자적으로 1 감소시킨 값을 반환합니다. 기존 TTL은 유지됩니다.
    async fn decrement(&self, key: &str) -> AppResult<i64>;

    async fn expire(&self, key: &str, ttl_seconds: u64) -> AppResult<()>;

    /// 남은 TTL(초). 키가 없거나 만료가 설정되지 않았으면 `None`.
    async fn ttl(&self, key: &str) -> AppResult<Option<u64>>;

    async fn exists(&self, key: &str) -> AppResult<bool>;
}

impl dyn KeyValueStore {
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AppError::RedisError(format!("Failed to decode {}: {}", key, e))),
            None => Ok(None),
        }
    }

    pub async fn set_json<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> AppResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| AppError::RedisError(format!("Failed to encode {}: {}", key, e)))?;
        self.set(key, &raw, ttl_seconds).await
    }
}
