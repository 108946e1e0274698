//! 서비스 단위 테스트용 메모리 구현
//!
//! MongoDB, Redis, Zeptomail, Google 없이 서비스 로직을 검증하기 위한 대역입니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::caching::KeyValueStore;
use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::gmail::GmailAccount;
use crate::domain::entities::users::User;
use crate::domain::models::oauth::{OAuthCredential, ProviderIdentity, ProviderTokens};
use crate::repositories::{GmailAccountStore, UserStore};
use crate::services::auth::IdentityProvider;
use crate::services::mail::MailTransport;

// ---------------------------------------------------------------------------
// Key-value
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, (String, Option<Instant>)>>,
}

impl InMemoryKeyValueStore {
    fn live(entries: &mut HashMap<String, (String, Option<Instant>)>, key: &str) -> bool {
        match entries.get(key) {
            Some((_, Some(deadline))) if *deadline <= Instant::now() => {
                entries.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// 키를 즉시 만료시킵니다.
    pub fn expire_now(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().unwrap();
        Self::live(&mut entries, key)
    }

    fn add(&self, key: &str, delta: i64) -> AppResult<i64> {
        let mut entries = self.entries.lock().unwrap();
        let live = Self::live(&mut entries, key);
        let entry = entries.entry(key.to_string()).or_insert_with(|| ("0".to_string(), None));
        if !live {
            *entry = ("0".to_string(), None);
        }
        let next = entry
            .0
            .parse::<i64>()
            .map_err(|_| AppError::RedisError("value is not an integer".to_string()))?
            + delta;
        entry.0 = next.to_string();
        Ok(next)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        if Self::live(&mut entries, key) {
            entries.get(key).map(|(value, _)| value.clone())
        } else {
            None
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> AppResult<()> {
        let deadline = ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl));
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), deadline));
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let mut entries = self.entries.lock().unwrap();
        // 만료된 항목은 live()가 먼저 치웁니다
        Self::live(&mut entries, key);
        Ok(entries.remove(key).is_some())
    }

    async fn increment(&self, key: &str) -> AppResult<i64> {
        self.add(key, 1)
    }

    async fn decrement(&self, key: &str) -> AppResult<i64> {
        self.add(key, -1)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        if Self::live(&mut entries, key) {
            if let Some(entry) = entries.get_mut(key) {
                entry.1 = Some(Instant::now() + Duration::from_secs(ttl_seconds));
            }
        }
        Ok(())
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<u64>> {
        let mut entries = self.entries.lock().unwrap();
        if !Self::live(&mut entries, key) {
            return Ok(None);
        }
        Ok(entries
            .get(key)
            .and_then(|(_, deadline)| *deadline)
            .map(|deadline| deadline.saturating_duration_since(Instant::now()).as_secs()))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.contains(key))
    }
}

/// 첫 `increment` 호출만 `delay`만큼 늦추는 저장소
///
/// 같은 이메일의 검증 요청이 겹치는 순서를 재현할 때 씁니다.
pub struct SlowFirstIncrementStore {
    inner: Arc<InMemoryKeyValueStore>,
    delay: Duration,
    pending: AtomicBool,
}

impl SlowFirstIncrementStore {
    pub fn new(inner: Arc<InMemoryKeyValueStore>, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            pending: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl KeyValueStore for SlowFirstIncrementStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> AppResult<()> {
        self.inner.set(key, value, ttl_seconds).await
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        self.inner.delete(key).await
    }

    async fn increment(&self, key: &str) -> AppResult<i64> {
        if self.pending.swap(false, Ordering::SeqCst) {
            actix_web::rt::time::sleep(self.delay).await;
        }
        self.inner.increment(key).await
    }

    async fn decrement(&self, key: &str) -> AppResult<i64> {
        self.inner.decrement(key).await
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> AppResult<()> {
        self.inner.expire(key, ttl_seconds).await
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<u64>> {
        self.inner.ttl(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// `find_by_id`는 캐시 항목이 있으면 그 값을 먼저 돌려줍니다.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    cache: Mutex<HashMap<ObjectId, User>>,
}

impl InMemoryUserStore {
    /// 캐시 무효화에 실패한 상황처럼 이전 사용자 상태를 캐시에 남깁니다.
    pub fn leave_stale_cache(&self, user: &User) {
        if let Some(id) = user.id {
            self.cache.lock().unwrap().insert(id, user.clone());
        }
    }

    /// 저장된 사용자를 하나 넣고 ID가 채워진 값을 돌려줍니다.
    pub fn insert(&self, mut user: User) -> User {
        user.id = Some(ObjectId::new());
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn get(&self, id: &ObjectId) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id.as_ref() == Some(id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        if let Some(cached) = self.cache.lock().unwrap().get(id) {
            return Ok(Some(cached.clone()));
        }
        Ok(self.get(id))
    }

    async fn find_by_id_uncached(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_or_provider_id(
        &self,
        email: &str,
        provider: AuthProvider,
        provider_id: &str,
    ) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| {
                u.email == email
                    || (u.provider == provider && u.provider_id.as_deref() == Some(provider_id))
            })
            .cloned())
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError("User with this email already exists".to_string()));
        }
        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id && user.id.is_some()) {
            Some(slot) => {
                *slot = user.clone();
                if let Some(id) = user.id {
                    self.cache.lock().unwrap().remove(&id);
                }
                Ok(())
            }
            None => Err(AppError::NotFound("User not found".to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Gmail accounts
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryGmailStore {
    accounts: Mutex<Vec<GmailAccount>>,
}

impl InMemoryGmailStore {
    pub fn all_for(&self, user_id: &ObjectId) -> Vec<GmailAccount> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == *user_id)
            .cloned()
            .collect()
    }

    pub fn insert(&self, mut account: GmailAccount) -> GmailAccount {
        account.id = Some(ObjectId::new());
        self.accounts.lock().unwrap().push(account.clone());
        account
    }
}

#[async_trait]
impl GmailAccountStore for InMemoryGmailStore {
    async fn find_owned(&self, user_id: &ObjectId, account_id: &ObjectId) -> AppResult<Option<GmailAccount>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user_id == *user_id && a.id.as_ref() == Some(account_id))
            .cloned())
    }

    async fn find_by_user_and_email(&self, user_id: &ObjectId, email: &str) -> AppResult<Option<GmailAccount>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user_id == *user_id && a.email == email)
            .cloned())
    }

    async fn count_connected(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self.all_for(user_id).iter().filter(|a| a.is_connected()).count() as u64)
    }

    async fn list_connected(&self, user_id: &ObjectId) -> AppResult<Vec<GmailAccount>> {
        let mut accounts: Vec<GmailAccount> =
            self.all_for(user_id).into_iter().filter(|a| a.is_connected()).collect();
        accounts.sort_by(|a, b| {
            b.is_primary
                .cmp(&a.is_primary)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(accounts)
    }

    async fn create(&self, account: GmailAccount) -> AppResult<GmailAccount> {
        if self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.user_id == account.user_id && a.email == account.email)
        {
            return Err(AppError::ConflictError("Gmail account is already connected".to_string()));
        }
        Ok(self.insert(account))
    }

    async fn save(&self, account: &GmailAccount) -> AppResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.id == account.id && account.id.is_some()) {
            Some(slot) => {
                *slot = account.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("Gmail account not found".to_string())),
        }
    }

    async fn clear_primary(&self, user_id: &ObjectId, except: Option<&ObjectId>) -> AppResult<()> {
        for account in self.accounts.lock().unwrap().iter_mut() {
            if account.user_id == *user_id && account.id.as_ref() != except {
                account.is_primary = false;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mail
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeMailTransport {
    sent: Mutex<Vec<(String, serde_json::Value)>>,
    fail: AtomicBool,
}

impl FakeMailTransport {
    pub fn failing() -> Self {
        let transport = Self::default();
        transport.fail.store(true, Ordering::SeqCst);
        transport
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// 가장 최근에 해당 수신자에게 보낸 OTP 코드
    pub fn last_code_for(&self, recipient: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == recipient)
            .and_then(|(_, vars)| vars["otp"].as_str().map(str::to_string))
    }
}

#[async_trait]
impl MailTransport for FakeMailTransport {
    async fn send_templated_email(
        &self,
        recipient: &str,
        _template_id: &str,
        variables: serde_json::Value,
    ) -> AppResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError("mail provider unavailable".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((recipient.to_string(), variables));
        Ok(format!("msg-{}", sent.len()))
    }
}

// ---------------------------------------------------------------------------
// Identity provider
// ---------------------------------------------------------------------------

pub struct FakeIdentityProvider {
    identity: Mutex<ProviderIdentity>,
    refresh_token: Mutex<Option<String>>,
    exchange_calls: AtomicUsize,
}

impl FakeIdentityProvider {
    pub fn returning(email: &str, external_id: &str, display_name: Option<&str>) -> Self {
        Self {
            identity: Mutex::new(ProviderIdentity {
                email: Some(email.to_string()),
                external_id: Some(external_id.to_string()),
                display_name: display_name.map(str::to_string),
                avatar_url: Some("https://example.com/a.png".to_string()),
            }),
            refresh_token: Mutex::new(Some("1//refresh".to_string())),
            exchange_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_identity(&self, identity: ProviderIdentity) {
        *self.identity.lock().unwrap() = identity;
    }

    pub fn set_refresh_token(&self, refresh_token: Option<&str>) {
        *self.refresh_token.lock().unwrap() = refresh_token.map(str::to_string);
    }

    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn exchange(&self, credential: &OAuthCredential) -> AppResult<ProviderTokens> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        let access_token = match credential {
            OAuthCredential::AccessToken(token) => token.clone(),
            OAuthCredential::AuthorizationCode(code) => format!("access-for-{}", code),
        };
        Ok(ProviderTokens {
            access_token,
            refresh_token: self.refresh_token.lock().unwrap().clone(),
            expires_at: None,
        })
    }

    async fn fetch_identity(&self, _access_token: &str) -> AppResult<ProviderIdentity> {
        Ok(self.identity.lock().unwrap().clone())
    }
}
