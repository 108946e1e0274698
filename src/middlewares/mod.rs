//! 미들웨어 모듈
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 액세스 토큰 검증
//! - 사용자 정보를 request extension에 저장
//! - 토큰이 없거나 유효하지 않으면 401 (`AppError` JSON 본문)
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1/gmail-accounts")
//!             .wrap(AuthMiddleware::required())
//!             .route("", web::get().to(list_accounts))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
