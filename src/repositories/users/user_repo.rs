//! # 사용자 리포지토리 구현
//!
//! MongoDB `users` 컬렉션을 주 저장소로, Redis를 ID 조회 캐시로 사용합니다.
//!
//! ## 캐싱 전략
//!
//! - **키 패턴**: `user:{user_id}` (리포지토리 매크로의 `cache_key()`)
//! - **TTL**: 600초
//! - **무효화**: `save` 직후 (실패하면 경고 로그만 남김)
//! - **우회**: `find_by_id_uncached`. 토큰 갱신과 프로필 갱신은 항상 MongoDB를 직접 읽습니다.
//!
//! 이메일 조회는 캐시하지 않습니다. 로그인 경로는 항상 최신 provider/비밀번호
//! 상태를 봐야 하기 때문입니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    config::AuthProvider,
    core::errors::{AppError, AppResult},
    core::registry::Repository,
    db::Database,
    domain::entities::users::User,
    repositories::{is_duplicate_key_error, users::UserStore},
};

const USER_CACHE_TTL_SECONDS: usize = 600;

/// 사용자 데이터 액세스 리포지토리
///
/// ```rust,ignore
/// let repo = ServiceLocator::get::<UserRepository>();
/// let user = repo.find_by_email("alice@example.com").await?;
/// ```
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 사용자 컬렉션 인덱스
    ///
    /// 1. `email` 유니크: 동시 가입 시 두 번째 insert가 중복 키로 실패
    /// 2. `(provider, provider_id)`: Google 로그인 시 외부 ID 조회
    /// 3. `created_at` 내림차순
    pub async fn create_indexes(&self) -> AppResult<()> {
        let collection = self.collection::<User>();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let provider_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "provider_id": 1 })
            .options(IndexOptions::builder()
                .name("provider_provider_id".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([email_index, provider_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.find_by_id_uncached(id).await?;

        if let Some(ref user) = user {
            if let Err(e) = self.redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL_SECONDS)
                .await
            {
                log::warn!("⚠️ 사용자 캐시 저장 실패: {} ({})", cache_key, e);
            }
        }

        Ok(user)
    }

    async fn find_by_id_uncached(&self, id: &ObjectId) -> AppResult<Option<User>> {
        self.collection::<User>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection::<User>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_email_or_provider_id(
        &self,
        email: &str,
        provider: AuthProvider,
        provider_id: &str,
    ) -> AppResult<Option<User>> {
        let filter = doc! {
            "$or": [
                { "email": email },
                { "provider": provider.as_str(), "provider_id": provider_id },
            ]
        };

        self.collection::<User>()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("User with this email already exists".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("Inserted user id is not an ObjectId".to_string())
        })?;
        user.id = Some(id);

        log::info!("👤 새 사용자 생성: {} ({})", user.email, user.provider.as_str());
        Ok(user)
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let id = user.id.ok_or_else(|| {
            AppError::InternalError("Cannot save a user without an id".to_string())
        })?;

        let result = self.collection::<User>()
            .replace_one(doc! { "_id": id }, user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("User with this email already exists".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        if let Err(e) = self.invalidate_cache(&id.to_hex()).await {
            // 캐시는 TTL까지 이전 값을 돌려줄 수 있음. 최신 상태가 필요한 경로는 find_by_id_uncached 사용
            log::warn!("⚠️ 사용자 캐시 무효화 실패: {} ({})", id.to_hex(), e);
        }

        if result.matched_count == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
