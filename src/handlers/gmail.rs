//! Gmail 계정 핸들러
//!
//! `/api/v1/gmail-accounts` 스코프 전체가 인증을 요구합니다. 응답에는 토큰이 포함되지 않습니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::dto::gmail::ConnectGmailRequest;
use crate::domain::dto::ApiResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::validate_request;
use crate::services::gmail::GmailAccountService;

#[post("/connect")]
pub async fn connect_account(
    user: AuthenticatedUser,
    payload: web::Json<ConnectGmailRequest>,
) -> Result<HttpResponse, AppError> {
    validate_request(&payload.0)?;
    let credential = payload
        .credential()
        .ok_or_else(|| AppError::ValidationError("Google token or authorization code is required".to_string()))?;

    let account = GmailAccountService::instance()
        .connect(&user.user_id, &credential, payload.is_primary)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(account, "Gmail account connected")))
}

#[get("")]
pub async fn list_accounts(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let accounts = GmailAccountService::instance().list(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(accounts)))
}

#[patch("/{id}/primary")]
pub async fn set_primary_account(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let account = GmailAccountService::instance()
        .set_primary(&user.user_id, &path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(account, "Primary Gmail account updated")))
}

#[delete("/{id}")]
pub async fn disconnect_account(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    GmailAccountService::instance()
        .disconnect(&user.user_id, &path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Gmail account disconnected")))
}
