//! 로그인 확인자
//!
//! 세 가지 로그인 경로를 하나의 사용자 레코드로 정규화하고 토큰 쌍을 발급합니다.
//!
//! | 경로 | 처음 보는 이메일 | 다른 제공자로 가입된 계정 |
//! |------|------------------|---------------------------|
//! | 비밀번호 | 비밀번호로 계정 생성 (미인증) | 401 |
//! | OTP | 계정 생성 (이메일 인증됨) | 401 |
//! | Google | 계정 생성 (provider = google) | Google 계정으로 병합 |
//!
//! 모든 경로는 변경 후 프로필 완성도를 다시 계산하고 저장한 다음,
//! 저장된 상태로 클레임을 만들어 토큰을 발급합니다.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::{AuthProvider, PasswordConfig};
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::core::registry::{ServiceLocator, ServiceRegistration};
use crate::domain::dto::users::response::AuthSession;
use crate::domain::entities::users::User;
use crate::domain::models::oauth::OAuthCredential;
use crate::domain::models::token::UserClaims;
use crate::repositories::{UserRepository, UserStore};
use crate::services::auth::{GoogleAuthService, IdentityProvider, OtpService, TokenService};
use crate::utils::string_utils::normalize_email;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const USE_GOOGLE: &str = "Please use Google OAuth to sign in";

static AUTH_SERVICE_INSTANCE: OnceCell<Arc<AuthService>> = OnceCell::new();

pub struct AuthService {
    users: Arc<dyn UserStore>,
    otp: Arc<OtpService>,
    identity: Arc<dyn IdentityProvider>,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn instance() -> Arc<Self> {
        AUTH_SERVICE_INSTANCE
            .get_or_init(|| {
                let users: Arc<dyn UserStore> = ServiceLocator::get::<UserRepository>();
                let identity: Arc<dyn IdentityProvider> = GoogleAuthService::instance();
                Arc::new(Self::new(
                    users,
                    OtpService::instance(),
                    identity,
                    TokenService::instance(),
                    PasswordConfig::bcrypt_cost(),
                ))
            })
            .clone()
    }

    pub fn new(
        users: Arc<dyn UserStore>,
        otp: Arc<OtpService>,
        identity: Arc<dyn IdentityProvider>,
        tokens: Arc<TokenService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            otp,
            identity,
            tokens,
            bcrypt_cost,
        }
    }

    /// 저장된 사용자로 세션(사용자 + 토큰 쌍)을 만듭니다.
    fn session_for(&self, user: &User) -> AppResult<AuthSession> {
        let claims = UserClaims::from_user(user)
            .ok_or_else(|| AppError::InternalError("Stored user has no id".to_string()))?;
        let tokens = self.tokens.issue(&claims)?;
        Ok(AuthSession::new(user, tokens))
    }

    /// 비밀번호 로그인
    ///
    /// 처음 보는 이메일이면 주어진 비밀번호로 계정을 만듭니다.
    /// 계정이 없는 경우와 비밀번호가 틀린 경우는 같은 메시지로 실패합니다.
    pub async fn login_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = normalize_email(email);

        let user = match self.users.find_by_email(&email).await? {
            None => {
                let password_hash = bcrypt::hash(password, self.bcrypt_cost)
                    .context("비밀번호 해싱 실패")?;

                let mut user = User::new_with_password(&email, password_hash);
                user.touch_login();
                user.refresh_profile_completion();

                let created = self.users.create(user).await?;
                log::info!("🆕 비밀번호 로그인으로 계정 생성: {}", created.email);
                created
            }
            Some(mut user) => {
                if user.provider != AuthProvider::Email {
                    return Err(AppError::AuthenticationError(USE_GOOGLE.to_string()));
                }
                let password_hash = user
                    .password_hash
                    .as_deref()
                    .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

                let is_valid = bcrypt::verify(password, password_hash)
                    .context("비밀번호 검증 실패")?;
                if !is_valid {
                    log::warn!("🔐 비밀번호 불일치: {}", email);
                    return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
                }

                user.touch_login();
                user.refresh_profile_completion();
                self.users.save(&user).await?;
                user
            }
        };

        log::info!("✅ 비밀번호 로그인: {}", user.email);
        self.session_for(&user)
    }

    /// OTP 로그인
    ///
    /// 코드 검증은 OTP 엔진에 맡기고, 성공하면 이메일로 사용자를 찾거나 만듭니다.
    pub async fn login_with_otp(&self, email: &str, code: &str) -> AppResult<AuthSession> {
        let verified = self.otp.verify(email, code).await?;

        let user = match self.users.find_by_email(&verified.email).await? {
            None => {
                let mut user = User::new_verified_email(&verified.email);
                user.touch_login();
                user.refresh_profile_completion();

                let created = self.users.create(user).await?;
                log::info!("🆕 OTP 로그인으로 계정 생성: {}", created.email);
                created
            }
            Some(mut user) => {
                if user.provider != AuthProvider::Email {
                    return Err(AppError::AuthenticationError(USE_GOOGLE.to_string()));
                }
                user.is_email_verified = true;
                user.touch_login();
                user.refresh_profile_completion();
                self.users.save(&user).await?;
                user
            }
        };

        log::info!("✅ OTP 로그인: {}", user.email);
        self.session_for(&user)
    }

    /// Google 로그인
    ///
    /// 이메일 또는 Google ID가 일치하는 사용자가 있으면 Google 계정으로 병합합니다.
    /// 사용자가 직접 입력한 이름은 덮어쓰지 않습니다.
    pub async fn login_with_google(&self, credential: &OAuthCredential) -> AppResult<AuthSession> {
        let provider_tokens = self.identity.exchange(credential).await?;
        let identity = self.identity.fetch_identity(&provider_tokens.access_token).await?;

        let (email, external_id) = match (identity.email, identity.external_id) {
            (Some(email), Some(external_id)) => (normalize_email(&email), external_id),
            _ => {
                return Err(AppError::ValidationError(
                    "Failed to get user information from Google".to_string(),
                ));
            }
        };

        let existing = self.users
            .find_by_email_or_provider_id(&email, AuthProvider::Google, &external_id)
            .await?;

        let user = match existing {
            Some(mut user) => {
                user.provider = AuthProvider::Google;
                user.provider_id = Some(external_id);
                user.password_hash = None;
                if user.name.trim().is_empty() {
                    if let Some(name) = identity.display_name {
                        user.name = name.trim().to_string();
                    }
                }
                if identity.avatar_url.is_some() {
                    user.avatar = identity.avatar_url;
                }
                user.is_email_verified = true;
                user.touch_login();
                user.refresh_profile_completion();
                self.users.save(&user).await?;

                log::info!("🔗 Google 계정 병합: {}", user.email);
                user
            }
            None => {
                let mut user = User::new_google(&email, external_id, identity.display_name, identity.avatar_url);
                user.touch_login();
                user.refresh_profile_completion();

                let created = self.users.create(user).await?;
                log::info!("🆕 Google 로그인으로 계정 생성: {}", created.email);
                created
            }
        };

        self.session_for(&user)
    }
}

fn auth_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(AuthService::instance())
}

inventory::submit! {
    ServiceRegistration {
        name: "auth_service",
        constructor: auth_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JwtSettings, OtpSettings};
    use crate::domain::entities::users::{HrType, UserRole};
    use crate::domain::models::oauth::ProviderIdentity;
    use crate::testing::{FakeIdentityProvider, FakeMailTransport, InMemoryKeyValueStore, InMemoryUserStore};

    struct Harness {
        service: AuthService,
        users: Arc<InMemoryUserStore>,
        mail: Arc<FakeMailTransport>,
        identity: Arc<FakeIdentityProvider>,
        tokens: Arc<TokenService>,
        otp: Arc<OtpService>,
    }

    fn harness() -> Harness {
        let users = Arc::new(InMemoryUserStore::default());
        let mail = Arc::new(FakeMailTransport::default());
        let identity = Arc::new(FakeIdentityProvider::returning("g@x.com", "google-1", Some("Gina")));
        let otp = Arc::new(OtpService::new(
            Arc::new(InMemoryKeyValueStore::default()),
            mail.clone(),
            OtpSettings::default(),
        ));
        let tokens = Arc::new(TokenService::new(
            users.clone(),
            JwtSettings {
                secret: "test-secret".to_string(),
                access_ttl: chrono::Duration::minutes(15),
                refresh_ttl: chrono::Duration::days(7),
            },
        ));
        let service = AuthService::new(users.clone(), otp.clone(), identity.clone(), tokens.clone(), 4);
        Harness { service, users, mail, identity, tokens, otp }
    }

    fn google_token() -> OAuthCredential {
        OAuthCredential::AccessToken("ya29.token".to_string())
    }

    #[actix_web::test]
    async fn test_password_login_creates_account_for_unseen_email() {
        let h = harness();

        let session = h.service.login_with_password(" New@X.com ", "secret123").await.unwrap();

        assert_eq!(session.user.email, "new@x.com");
        assert_eq!(h.users.len(), 1);
        assert!(!session.user.is_email_verified);
        assert!(!session.user.is_profile_complete);
        let claims = h.tokens.verify(&session.tokens.access_token).unwrap();
        assert_eq!(claims.sub, session.user.id);
        assert_eq!(claims.provider, AuthProvider::Email);
    }

    #[actix_web::test]
    async fn test_password_login_hashes_and_checks_password() {
        let h = harness();
        h.service.login_with_password("a@x.com", "secret123").await.unwrap();

        let again = h.service.login_with_password("a@x.com", "secret123").await;
        assert!(again.is_ok());
        assert_eq!(h.users.len(), 1);

        let wrong = h.service.login_with_password("a@x.com", "nope").await.unwrap_err();
        assert!(matches!(wrong, AppError::AuthenticationError(ref m) if m == INVALID_CREDENTIALS));
    }

    #[actix_web::test]
    async fn test_password_login_rejects_google_account() {
        let h = harness();
        h.users.insert(User::new_google("g@x.com", "google-1".to_string(), None, None));

        let err = h.service.login_with_password("g@x.com", "secret123").await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(ref m) if m == USE_GOOGLE));
    }

    #[actix_web::test]
    async fn test_otp_login_creates_verified_account() {
        let h = harness();
        h.otp.issue("otp@x.com").await.unwrap();
        let code = h.mail.last_code_for("otp@x.com").unwrap();

        let session = h.service.login_with_otp("OTP@x.com", &code).await.unwrap();

        assert_eq!(session.user.email, "otp@x.com");
        assert!(session.user.is_email_verified);
        assert_eq!(h.users.len(), 1);
    }

    #[actix_web::test]
    async fn test_otp_login_with_wrong_code_creates_nothing() {
        let h = harness();
        h.otp.issue("otp@x.com").await.unwrap();
        let code = h.mail.last_code_for("otp@x.com").unwrap();
        let wrong = if code == "000000" { "111111" } else { "000000" };

        let err = h.service.login_with_otp("otp@x.com", wrong).await.unwrap_err();
        assert_eq!(err.remaining_attempts(), Some(4));
        assert_eq!(h.users.len(), 0);
    }

    #[actix_web::test]
    async fn test_otp_login_marks_existing_password_account_verified() {
        let h = harness();
        let existing = h.users.insert(User::new_with_password("a@x.com", "hash".to_string()));
        h.otp.issue("a@x.com").await.unwrap();
        let code = h.mail.last_code_for("a@x.com").unwrap();

        h.service.login_with_otp("a@x.com", &code).await.unwrap();

        let stored = h.users.get(existing.id.as_ref().unwrap()).unwrap();
        assert!(stored.is_email_verified);
        assert!(stored.last_login_at.is_some());
    }

    #[actix_web::test]
    async fn test_otp_login_rejects_google_account() {
        let h = harness();
        h.users.insert(User::new_google("g@x.com", "google-1".to_string(), None, None));
        h.otp.issue("g@x.com").await.unwrap();
        let code = h.mail.last_code_for("g@x.com").unwrap();

        let err = h.service.login_with_otp("g@x.com", &code).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));
    }

    #[actix_web::test]
    async fn test_google_login_creates_account() {
        let h = harness();

        let session = h.service.login_with_google(&google_token()).await.unwrap();

        assert_eq!(session.user.email, "g@x.com");
        assert_eq!(session.user.name, "Gina");
        assert_eq!(session.user.provider, AuthProvider::Google);
        assert!(session.user.is_email_verified);
        assert!(!session.user.is_profile_complete);
    }

    #[actix_web::test]
    async fn test_google_login_merges_without_overwriting_name() {
        let h = harness();
        let mut existing = User::new_with_password("g@x.com", "hash".to_string());
        existing.name = "Chosen Name".to_string();
        existing.role = UserRole::Hr;
        existing.hr_type = Some(HrType::Company);
        existing.company_name = Some("Acme".to_string());
        let existing = h.users.insert(existing);

        let session = h.service.login_with_google(&google_token()).await.unwrap();

        assert_eq!(h.users.len(), 1);
        assert_eq!(session.user.name, "Chosen Name");
        assert!(session.user.is_profile_complete);

        let stored = h.users.get(existing.id.as_ref().unwrap()).unwrap();
        assert_eq!(stored.provider, AuthProvider::Google);
        assert_eq!(stored.provider_id.as_deref(), Some("google-1"));
        assert!(stored.password_hash.is_none());

        let claims = h.tokens.verify(&session.tokens.access_token).unwrap();
        assert!(claims.is_profile_complete);
        assert_eq!(claims.provider, AuthProvider::Google);
    }

    #[actix_web::test]
    async fn test_google_login_backfills_empty_name() {
        let h = harness();
        h.users.insert(User::new_verified_email("g@x.com"));

        let session = h.service.login_with_google(&google_token()).await.unwrap();
        assert_eq!(session.user.name, "Gina");
    }

    #[actix_web::test]
    async fn test_google_login_without_email_is_bad_request() {
        let h = harness();
        h.identity.set_identity(ProviderIdentity {
            email: None,
            external_id: Some("google-1".to_string()),
            ..ProviderIdentity::default()
        });

        let err = h.service.login_with_google(&google_token()).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(h.users.len(), 0);
    }
}
