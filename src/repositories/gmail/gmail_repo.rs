//! # Gmail 계정 리포지토리 구현
//!
//! `gmail_accounts` 컬렉션. 목록/개수 조회가 대부분이라 캐시하지 않습니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::errors::{AppError, AppResult},
    core::registry::Repository,
    db::Database,
    domain::entities::gmail::{GmailAccount, GmailAccountStatus},
    repositories::{gmail::GmailAccountStore, is_duplicate_key_error},
};

#[repository(name = "gmail_account", collection = "gmail_accounts")]
pub struct GmailAccountRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

fn connected_filter(user_id: &ObjectId) -> Document {
    doc! {
        "user_id": *user_id,
        "status": { "$ne": GmailAccountStatus::Inactive.as_str() },
    }
}

impl GmailAccountRepository {
    /// 1. `(user_id, email)` 유니크
    /// 2. `(user_id, is_primary)`: 기본 계정 조회/해제
    /// 3. `(user_id, status)`: 연결된 계정 개수/목록
    pub async fn create_indexes(&self) -> AppResult<()> {
        let collection = self.collection::<GmailAccount>();

        let owner_email_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_email_unique".to_string())
                .build())
            .build();

        let primary_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "is_primary": 1 })
            .options(IndexOptions::builder()
                .name("user_primary".to_string())
                .build())
            .build();

        let status_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "status": 1 })
            .options(IndexOptions::builder()
                .name("user_status".to_string())
                .build())
            .build();

        collection
            .create_indexes([owner_email_index, primary_index, status_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl GmailAccountStore for GmailAccountRepository {
    async fn find_owned(&self, user_id: &ObjectId, account_id: &ObjectId) -> AppResult<Option<GmailAccount>> {
        self.collection::<GmailAccount>()
            .find_one(doc! { "_id": *account_id, "user_id": *user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_user_and_email(&self, user_id: &ObjectId, email: &str) -> AppResult<Option<GmailAccount>> {
        self.collection::<GmailAccount>()
            .find_one(doc! { "user_id": *user_id, "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn count_connected(&self, user_id: &ObjectId) -> AppResult<u64> {
        self.collection::<GmailAccount>()
            .count_documents(connected_filter(user_id))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn list_connected(&self, user_id: &ObjectId) -> AppResult<Vec<GmailAccount>> {
        let cursor = self.collection::<GmailAccount>()
            .find(connected_filter(user_id))
            .sort(doc! { "is_primary": -1, "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut account: GmailAccount) -> AppResult<GmailAccount> {
        let result = self.collection::<GmailAccount>()
            .insert_one(&account)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("Gmail account is already connected".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("Inserted gmail account id is not an ObjectId".to_string())
        })?;
        account.id = Some(id);
        Ok(account)
    }

    async fn save(&self, account: &GmailAccount) -> AppResult<()> {
        let id = account.id.ok_or_else(|| {
            AppError::InternalError("Cannot save a gmail account without an id".to_string())
        })?;

        let result = self.collection::<GmailAccount>()
            .replace_one(doc! { "_id": id }, account)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Gmail account not found".to_string()));
        }
        Ok(())
    }

    async fn clear_primary(&self, user_id: &ObjectId, except: Option<&ObjectId>) -> AppResult<()> {
        let mut filter = doc! { "user_id": *user_id, "is_primary": true };
        if let Some(keep) = except {
            filter.insert("_id", doc! { "$ne": *keep });
        }

        self.collection::<GmailAccount>()
            .update_many(filter, doc! { "$set": { "is_primary": false, "updated_at": DateTime::now() } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
