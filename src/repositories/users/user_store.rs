use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::config::AuthProvider;
use crate::core::errors::AppResult;
use crate::domain::entities::users::User;

/// 사용자 저장소
///
/// 이메일 인자는 이미 정규화된 값이어야 합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// ID 조회. 구현체가 캐시를 거칠 수 있으므로 잠시 이전 상태일 수 있습니다.
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    /// 캐시를 거치지 않고 주 저장소에서 읽습니다.
    ///
    /// 토큰 갱신처럼 저장된 최신 상태가 필요한 경로에서 사용합니다.
    async fn find_by_id_uncached(&self, id: &ObjectId) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 이메일이 같거나 `(provider, provider_id)`가 같은 사용자
    async fn find_by_email_or_provider_id(
        &self,
        email: &str,
        provider: AuthProvider,
        provider_id: &str,
    ) -> AppResult<Option<User>>;

    /// 새 사용자를 저장하고 ID가 채워진 값을 반환합니다.
    ///
    /// 이메일이 이미 있으면 `ConflictError`.
    async fn create(&self, user: User) -> AppResult<User>;

    /// 기존 사용자 문서를 통째로 교체합니다.
    async fn save(&self, user: &User) -> AppResult<()>;
}
