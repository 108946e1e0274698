//! Redis 클라이언트
//!
//! 리포지토리 캐시용 JSON 헬퍼(`get`, `set_with_expiry`, `del` 등)와
//! OTP 상태 저장을 위한 [`KeyValueStore`] 구현을 함께 제공합니다.
//!
//! 모든 호출은 multiplexed 비동기 연결을 사용합니다.

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

use crate::caching::store::KeyValueStore;
use crate::core::errors::AppResult;

#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 PING으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), redis::RedisError> {
        let mut conn = self.connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set(key, json).await
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let mut conn = self.connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set_ex(key, json, seconds as u64).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.connection().await?;
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        conn.del(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.connection().await?;
        conn.keys(pattern).await
    }
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> AppResult<()> {
        let mut conn = self.connection().await?;
        match ttl_seconds {
            Some(ttl) => {
                let _: () = conn.set_ex(key, value, ttl).await?;
            }
            None => {
                let _: () = conn.set(key, value).await?;
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection().await?;
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn increment(&self, key: &str) -> AppResult<i64> {
        let mut conn = self.connection().await?;
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }

    async fn decrement(&self, key: &str) -> AppResult<i64> {
        let mut conn = self.connection().await?;
        let value: i64 = conn.decr(key, 1).await?;
        Ok(value)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.expire(key, ttl_seconds as i64).await?;
        Ok(())
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<u64>> {
        let mut conn = self.connection().await?;
        // -2: 키 없음, -1: 만료 없음
        let remaining: i64 = conn.ttl(key).await?;
        Ok(u64::try_from(remaining).ok())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection().await?;
        let found: bool = conn.exists(key).await?;
        Ok(found)
    }
}
