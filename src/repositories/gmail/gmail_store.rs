use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppResult;
use crate::domain::entities::gmail::GmailAccount;

/// Gmail 계정 저장소
///
/// "연결된" 계정은 `status != inactive`인 계정입니다.
#[async_trait]
pub trait GmailAccountStore: Send + Sync {
    /// 사용자가 소유한 계정 (상태 무관)
    async fn find_owned(&self, user_id: &ObjectId, account_id: &ObjectId) -> AppResult<Option<GmailAccount>>;

    /// `(user_id, email)`로 조회 (상태 무관)
    async fn find_by_user_and_email(&self, user_id: &ObjectId, email: &str) -> AppResult<Option<GmailAccount>>;

    async fn count_connected(&self, user_id: &ObjectId) -> AppResult<u64>;

    /// 기본 계정 먼저, 그다음 최근 생성 순
    async fn list_connected(&self, user_id: &ObjectId) -> AppResult<Vec<GmailAccount>>;

    async fn create(&self, account: GmailAccount) -> AppResult<GmailAccount>;

    async fn save(&self, account: &GmailAccount) -> AppResult<()>;

    /// 사용자의 모든 계정에서 `is_primary`를 해제합니다. `except`는 건드리지 않습니다.
    async fn clear_primary(&self, user_id: &ObjectId, except: Option<&ObjectId>) -> AppResult<()>;
}
