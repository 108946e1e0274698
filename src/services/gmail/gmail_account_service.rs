//! # Gmail 계정 연결 서비스
//!
//! 사용자별로 여러 Gmail 메일함을 연결하고 기본 계정을 관리합니다.
//!
//! ## 규칙
//!
//! - 요금제 한도(`PlanConfig::max_gmail_accounts`, -1은 무제한)는 Google 교환 **전에** 검사합니다.
//! - 같은 `(user_id, email)`을 다시 연결하면 새로 만들지 않고 토큰과 상태를 갱신합니다.
//! - 사용자의 첫 계정은 요청이 없어도 기본 계정이 됩니다.
//! - 기본 계정 지정은 "다른 계정 해제 후 지정" 순서로 수행합니다.
//! - 연결 해제는 `status = inactive`로의 소프트 삭제이며 토큰은 남겨 둡니다.
//!
//! 기본 계정 지정은 트랜잭션으로 묶이지 않으므로, 같은 사용자에 대한 동시 요청은
//! 일시적으로 기본 계정을 0개 또는 2개로 만들 수 있습니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};
use once_cell::sync::OnceCell;

use crate::config::PlanConfig;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{ServiceLocator, ServiceRegistration};
use crate::domain::dto::gmail::response::GmailAccountView;
use crate::domain::entities::gmail::GmailAccount;
use crate::domain::models::oauth::OAuthCredential;
use crate::repositories::{GmailAccountRepository, GmailAccountStore, UserRepository, UserStore};
use crate::services::auth::{GoogleAuthService, IdentityProvider};
use crate::utils::string_utils::{normalize_email, parse_object_id};
use crate::utils::time_utils::from_utc;

static GMAIL_ACCOUNT_SERVICE_INSTANCE: OnceCell<Arc<GmailAccountService>> = OnceCell::new();

pub struct GmailAccountService {
    users: Arc<dyn UserStore>,
    accounts: Arc<dyn GmailAccountStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl GmailAccountService {
    pub fn instance() -> Arc<Self> {
        GMAIL_ACCOUNT_SERVICE_INSTANCE
            .get_or_init(|| {
                let users: Arc<dyn UserStore> = ServiceLocator::get::<UserRepository>();
                let accounts: Arc<dyn GmailAccountStore> = ServiceLocator::get::<GmailAccountRepository>();
                let identity: Arc<dyn IdentityProvider> = GoogleAuthService::instance();
                Arc::new(Self::new(users, accounts, identity))
            })
            .clone()
    }

    pub fn new(
        users: Arc<dyn UserStore>,
        accounts: Arc<dyn GmailAccountStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self { users, accounts, identity }
    }

    /// Gmail 계정을 연결하거나 재연결합니다.
    ///
    /// # Errors
    ///
    /// * 사용자가 없으면 `NotFound`
    /// * 요금제 한도에 도달했으면 `AuthorizationError` (Google 호출 없음)
    /// * Google이 이메일 또는 ID를 주지 않으면 `ValidationError`
    pub async fn connect(
        &self,
        user_id: &str,
        credential: &OAuthCredential,
        is_primary: bool,
    ) -> AppResult<GmailAccountView> {
        let user_id = parse_object_id(user_id, "user id")?;
        let user = self.users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let current = self.accounts.count_connected(&user_id).await?;
        if !PlanConfig::can_add_gmail_account(user.plan_type, current) {
            let plan = PlanConfig::for_plan(user.plan_type);
            log::warn!("🚫 Gmail 계정 한도 초과: {} ({} 플랜, {}개)", user.email, plan.name, current);
            return Err(AppError::AuthorizationError(format!(
                "You have reached the maximum limit of {} Gmail account(s) for your {} plan",
                plan.max_gmail_accounts, plan.name
            )));
        }

        let tokens = self.identity.exchange(credential).await?;
        let identity = self.identity.fetch_identity(&tokens.access_token).await?;

        let email = identity
            .email
            .map(|email| normalize_email(&email))
            .ok_or_else(|| AppError::ValidationError("Failed to get user email from Google".to_string()))?;
        let provider_id = identity
            .external_id
            .ok_or_else(|| AppError::ValidationError("Failed to get user ID from Google".to_string()))?;

        let token_expiry = tokens.expires_at.map(from_utc);
        let make_primary = is_primary || current == 0;

        let account = match self.accounts.find_by_user_and_email(&user_id, &email).await? {
            Some(mut account) => {
                account.reactivate(tokens.access_token, tokens.refresh_token, token_expiry);
                account.provider_id = provider_id;
                if make_primary {
                    self.accounts.clear_primary(&user_id, account.id.as_ref()).await?;
                    account.is_primary = true;
                }
                self.accounts.save(&account).await?;

                log::info!("🔄 Gmail 계정 재연결: {} → {}", user.email, account.email);
                account
            }
            None => {
                if make_primary {
                    self.accounts.clear_primary(&user_id, None).await?;
                }
                let mut account = GmailAccount::new(user_id, &email, provider_id, make_primary);
                account.access_token = tokens.access_token;
                account.refresh_token = tokens.refresh_token;
                account.token_expiry = token_expiry;

                let created = self.accounts.create(account).await?;
                log::info!("📬 Gmail 계정 연결: {} → {}", user.email, created.email);
                created
            }
        };

        Ok(GmailAccountView::from(&account))
    }

    async fn find_owned(&self, user_id: &str, account_id: &str) -> AppResult<(ObjectId, Option<GmailAccount>)> {
        let user_id = parse_object_id(user_id, "user id")?;
        let account_id = parse_object_id(account_id, "account id")?;
        let account = self.accounts.find_owned(&user_id, &account_id).await?;
        Ok((user_id, account))
    }

    /// 연결 해제 (소프트 삭제)
    pub async fn disconnect(&self, user_id: &str, account_id: &str) -> AppResult<()> {
        let (_, account) = self.find_owned(user_id, account_id).await?;
        let mut account = account.ok_or_else(|| AppError::NotFound("Gmail account not found".to_string()))?;

        account.deactivate();
        self.accounts.save(&account).await?;

        log::info!("📭 Gmail 계정 연결 해제: {}", account.email);
        Ok(())
    }

    /// 활성 계정을 기본 계정으로 지정합니다.
    pub async fn set_primary(&self, user_id: &str, account_id: &str) -> AppResult<GmailAccountView> {
        let (user_id, account) = self.find_owned(user_id, account_id).await?;
        let mut account = account
            .filter(GmailAccount::is_active)
            .ok_or_else(|| AppError::NotFound("Gmail account not found or inactive".to_string()))?;

        self.accounts.clear_primary(&user_id, account.id.as_ref()).await?;
        account.is_primary = true;
        account.updated_at = DateTime::now();
        self.accounts.save(&account).await?;

        log::info!("⭐ 기본 Gmail 계정 지정: {}", account.email);
        Ok(GmailAccountView::from(&account))
    }

    /// 연결된 계정 목록 (기본 계정 먼저, 그다음 최신순)
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<GmailAccountView>> {
        let user_id = parse_object_id(user_id, "user id")?;
        let accounts = self.accounts.list_connected(&user_id).await?;
        Ok(accounts.iter().map(GmailAccountView::from).collect())
    }

    /// 토큰을 포함한 계정 조회. 메일 수집기 전용이며 연결 해제된 계정은 돌려주지 않습니다.
    pub async fn get_with_tokens(&self, user_id: &str, account_id: &str) -> AppResult<GmailAccount> {
        let (_, account) = self.find_owned(user_id, account_id).await?;
        account
            .filter(GmailAccount::is_connected)
            .ok_or_else(|| AppError::NotFound("Gmail account not found".to_string()))
    }

    /// 연결된 계정 수
    pub async fn count(&self, user_id: &str) -> AppResult<u64> {
        let user_id = parse_object_id(user_id, "user id")?;
        self.accounts.count_connected(&user_id).await
    }
}

fn gmail_account_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(GmailAccountService::instance())
}

inventory::submit! {
    ServiceRegistration {
        name: "gmail_account_service",
        constructor: gmail_account_service_constructor,
    }
}
