//! Authentication HTTP Handlers
//!
//! 세 가지 로그인 경로와 토큰 갱신을 처리합니다. 모든 로그인 응답은
//! `{ user, tokens }` 형태의 [`AuthSession`](crate::domain::dto::users::AuthSession)입니다.
//!
//! - `POST /api/v1/auth/login` - 이메일/비밀번호 (처음 보는 이메일은 계정 생성)
//! - `POST /api/v1/auth/otp/send` - OTP 발송 (쿨다운, 시간당 한도 적용)
//! - `POST /api/v1/auth/otp/verify` - OTP 로그인
//! - `GET  /api/v1/auth/google/url` - Google 동의 화면 URL
//! - `POST /api/v1/auth/google` - Google 토큰 로그인
//! - `POST /api/v1/auth/refresh` - 토큰 회전

use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::dto::tokens::RefreshTokenRequest;
use crate::domain::dto::users::request::{GoogleLoginRequest, GoogleUrlQuery, LoginRequest, SendOtpRequest, VerifyOtpRequest};
use crate::domain::dto::ApiResponse;
use crate::domain::models::oauth::OAuthCredential;
use crate::handlers::validate_request;
use crate::services::auth::{AuthService, GoogleAuthService, OtpService, OtpThrottle, TokenService};

#[post("/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    validate_request(&payload.0)?;

    let session = AuthService::instance()
        .login_with_password(&payload.email, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(session, "Login successful")))
}

#[post("/otp/send")]
pub async fn send_otp(payload: web::Json<SendOtpRequest>) -> Result<HttpResponse, AppError> {
    validate_request(&payload.0)?;

    let issued = OtpThrottle::instance()
        .throttled(&payload.email, OtpService::instance().issue(&payload.email))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(issued, "OTP sent successfully")))
}

#[post("/otp/verify")]
pub async fn verify_otp(payload: web::Json<VerifyOtpRequest>) -> Result<HttpResponse, AppError> {
    validate_request(&payload.0)?;

    let session = AuthService::instance()
        .login_with_otp(&payload.email, &payload.otp)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(session, "Login successful")))
}

#[get("/google/url")]
pub async fn google_login_url(query: web::Query<GoogleUrlQuery>) -> Result<HttpResponse, AppError> {
    let url = GoogleAuthService::instance().get_login_url(query.state.as_deref());

    Ok(HttpResponse::Ok().json(ApiResponse::success(json!({ "url": url }))))
}

#[post("/google")]
pub async fn google_login(payload: web::Json<GoogleLoginRequest>) -> Result<HttpResponse, AppError> {
    validate_request(&payload.0)?;

    let credential = OAuthCredential::AccessToken(payload.token.trim().to_string());
    let session = AuthService::instance().login_with_google(&credential).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(session, "Google login successful")))
}

#[post("/refresh")]
pub async fn refresh_tokens(payload: web::Json<RefreshTokenRequest>) -> Result<HttpResponse, AppError> {
    validate_request(&payload.0)?;

    let tokens = TokenService::instance().refresh(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(tokens, "Tokens refreshed")))
}
