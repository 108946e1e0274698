//! 현재 사용자 핸들러
//!
//! 두 엔드포인트 모두 `AuthMiddleware::required()` 뒤에서만 동작합니다.

use actix_web::{get, post, web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::dto::users::request::CompleteProfileRequest;
use crate::domain::dto::ApiResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::validate_request;
use crate::middlewares::AuthMiddleware;
use crate::services::users::UserService;

#[get("/me", wrap = "AuthMiddleware::required()")]
pub async fn get_current_user(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let me = UserService::instance().get_me(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(me)))
}

/// 프로필 완성 후 새 클레임이 담긴 토큰 쌍을 함께 돌려줍니다.
#[post("/complete-profile", wrap = "AuthMiddleware::required()")]
pub async fn complete_profile(
    user: AuthenticatedUser,
    payload: web::Json<CompleteProfileRequest>,
) -> Result<HttpResponse, AppError> {
    validate_request(&payload.0)?;
    let update = payload.into_inner().into_update()?;

    let session = UserService::instance()
        .complete_profile(&user.user_id, update)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(session, "Profile completed")))
}
