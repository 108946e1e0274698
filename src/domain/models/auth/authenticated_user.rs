//! 인증된 요청 사용자
//!
//! `AuthMiddleware`가 액세스 토큰을 검증한 뒤 request extensions에 넣어 두고,
//! 핸들러는 extractor로 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("/me")]
//! async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     // user.user_id, user.role ...
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::core::errors::AppError;
use crate::domain::entities::users::UserRole;
use crate::domain::models::token::UserClaims;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub is_profile_complete: bool,
}

impl From<UserClaims> for AuthenticatedUser {
    fn from(claims: UserClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            provider: claims.provider,
            is_profile_complete: claims.is_profile_complete,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Authentication required".to_string()
            ).into())),
        }
    }
}
