//! API 라우트 설정 모듈
//!
//! # 라우트 구성
//!
//! | 스코프 | 인증 | 엔드포인트 |
//! |--------|------|------------|
//! | `/health` | 없음 | 헬스체크 |
//! | `/api/v1/auth` | 없음 | login, otp/send, otp/verify, google, google/url, refresh |
//! | `/api/v1/auth` | 필요 | me, complete-profile (핸들러 단위 `wrap`) |
//! | `/api/v1/gmail-accounts` | 필요 | connect, 목록, 기본 지정, 해제 |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! App::new().configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_gmail_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            // 비밀번호 / OTP
            .service(handlers::auth::login)
            .service(handlers::auth::send_otp)
            .service(handlers::auth::verify_otp)
            // Google
            .service(handlers::auth::google_login_url)
            .service(handlers::auth::google_login)
            // 토큰
            .service(handlers::auth::refresh_tokens)
            // 인증 필요
            .service(handlers::users::get_current_user)
            .service(handlers::users::complete_profile)
    );
}

fn configure_gmail_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/gmail-accounts")
            .wrap(AuthMiddleware::required())
            .service(handlers::gmail::connect_account)
            .service(handlers::gmail::list_accounts)
            .service(handlers::gmail::set_primary_account)
            .service(handlers::gmail::disconnect_account)
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "hirebox_auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
