//! # 사용자 서비스
//!
//! 인증된 사용자 자신에 대한 작업을 담당합니다.
//!
//! - [`UserService::get_me`]: 현재 사용자 조회 (비밀번호 해시 제외)
//! - [`UserService::complete_profile`]: 이름/역할/HR 정보 입력 후 새 토큰 발급
//!
//! 프로필이 바뀌면 토큰 클레임(역할, HR 정보, 완성 여부)도 바뀌어야 하므로
//! `complete_profile`은 저장 직후 새 토큰 쌍을 함께 돌려줍니다.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{ServiceLocator, ServiceRegistration};
use crate::domain::dto::users::response::{AuthSession, UserResponse};
use crate::domain::entities::users::{ProfileUpdate, User};
use crate::domain::models::token::UserClaims;
use crate::repositories::{UserRepository, UserStore};
use crate::services::auth::TokenService;
use crate::utils::string_utils::parse_object_id;

static USER_SERVICE_INSTANCE: OnceCell<Arc<UserService>> = OnceCell::new();

pub struct UserService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn instance() -> Arc<Self> {
        USER_SERVICE_INSTANCE
            .get_or_init(|| {
                let users: Arc<dyn UserStore> = ServiceLocator::get::<UserRepository>();
                Arc::new(Self::new(users, TokenService::instance()))
            })
            .clone()
    }

    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// `fresh`이면 캐시를 거치지 않습니다.
    async fn load(&self, user_id: &str, fresh: bool) -> AppResult<User> {
        let id = parse_object_id(user_id, "user id")?;
        let user = if fresh {
            self.users.find_by_id_uncached(&id).await?
        } else {
            self.users.find_by_id(&id).await?
        };
        user.ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 현재 사용자 조회
    pub async fn get_me(&self, user_id: &str) -> AppResult<UserResponse> {
        let user = self.load(user_id, false).await?;
        Ok(UserResponse::from(user))
    }

    /// 프로필을 한 번의 갱신으로 적용하고 새 토큰 쌍을 발급합니다.
    ///
    /// `update`는 이미 검증된 값이므로 여기서는 적용, 완성도 재계산, 저장만 합니다.
    pub async fn complete_profile(&self, user_id: &str, update: ProfileUpdate) -> AppResult<AuthSession> {
        // 통째로 교체 저장하므로 캐시된 이전 상태를 기준으로 삼지 않음
        let mut user = self.load(user_id, true).await?;

        user.apply_profile_update(update);
        self.users.save(&user).await?;

        log::info!(
            "📝 프로필 갱신: {} (완성: {})",
            user.email,
            user.is_profile_complete
        );

        let claims = UserClaims::from_user(&user)
            .ok_or_else(|| AppError::InternalError("Stored user has no id".to_string()))?;
        let tokens = self.tokens.issue(&claims)?;
        Ok(AuthSession::new(&user, tokens))
    }
}

fn user_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(UserService::instance())
}

inventory::submit! {
    ServiceRegistration {
        name: "user_service",
        constructor: user_service_constructor,
    }
}
