//! # Application Error Handling System
//!
//! 인증 코어 전체에서 사용하는 통합 에러 타입입니다.
//!
//! ## 에러 분류
//!
//! | 변형 | HTTP 상태 | 코드 |
//! |------|-----------|------|
//! | `ValidationError` | 400 | `BAD_REQUEST` |
//! | `OtpExpired` | 400 | `OTP_EXPIRED` |
//! | `AuthenticationError` | 401 | `UNAUTHORIZED` |
//! | `InvalidOtp` | 401 | `INVALID_CODE` |
//! | `AuthorizationError` | 403 | `FORBIDDEN` |
//! | `NotFound` | 404 | `NOT_FOUND` |
//! | `ConflictError` | 409 | `CONFLICT` |
//! | `OtpAttemptsExceeded` | 429 | `ATTEMPTS_EXCEEDED` |
//! | `TooManyRequests` | 429 | `TOO_MANY_REQUESTS` |
//! | 그 외 | 500 | `INTERNAL` |
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "success": false,
//!   "error": {
//!     "code": "INVALID_CODE",
//!     "message": "Invalid OTP. 4 attempts remaining",
//!     "remainingAttempts": 4
//!   }
//! }
//! ```
//!
//! 500 계열 변형(데이터베이스, Redis, 외부 서비스, 내부 오류)은 상세 메시지를
//! 로그로만 남기고 클라이언트에는 일반 메시지만 전달합니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find_user(&self, id: &ObjectId) -> AppResult<User> {
//!     self.users
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("User not found".to_string()))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    ///
    /// MongoDB 연결 실패, 쿼리 실패, 직렬화 실패 등을 나타냅니다.
    /// 500 Internal Server Error로 응답됩니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 관련 에러
    ///
    /// OTP 레코드와 재전송 카운터가 저장되는 키-값 저장소의 통신 오류입니다.
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400)
    ///
    /// 클라이언트 입력이 잘못되었거나, 외부 ID 제공자가 필수 정보(이메일, 외부 ID)를
    /// 돌려주지 않았거나, 외부 호출이 시간 초과된 경우에 사용합니다.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 (409)
    ///
    /// 유니크 인덱스 위반(이메일 중복 등)에 사용합니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    ///
    /// 잘못된 자격 증명, 다른 제공자로 가입된 계정, 유효하지 않거나 만료된 토큰.
    /// 메시지에 실패 원인을 구분하는 정보를 담지 않습니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (403)
    ///
    /// 요금제의 Gmail 계정 한도 초과가 대표적입니다.
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// OTP 레코드가 없거나 만료됨 (400)
    #[error("{0}")]
    OtpExpired(String),

    /// OTP 코드 불일치 (401)
    #[error("{message}")]
    InvalidOtp {
        message: String,
        remaining_attempts: u32,
    },

    /// OTP 검증 시도 횟수 초과 (429)
    ///
    /// 발생 시점에 OTP 레코드는 이미 삭제되어 있습니다.
    #[error("{0}")]
    OtpAttemptsExceeded(String),

    /// 재전송 쿨다운 또는 시간당 한도 초과 (429)
    #[error("{0}")]
    TooManyRequests(String),

    /// 외부 서비스 에러
    ///
    /// 메일 전송 실패 등 호출자의 입력과 무관한 외부 시스템 실패입니다.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트가 분기할 수 있는 안정적인 에러 코드
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "BAD_REQUEST",
            AppError::OtpExpired(_) => "OTP_EXPIRED",
            AppError::AuthenticationError(_) => "UNAUTHORIZED",
            AppError::InvalidOtp { .. } => "INVALID_CODE",
            AppError::AuthorizationError(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ConflictError(_) => "CONFLICT",
            AppError::OtpAttemptsExceeded(_) => "ATTEMPTS_EXCEEDED",
            AppError::TooManyRequests(_) => "TOO_MANY_REQUESTS",
            AppError::DatabaseError(_)
            | AppError::RedisError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => "INTERNAL",
        }
    }

    /// 남은 OTP 검증 시도 횟수 (해당하는 경우에만)
    pub fn remaining_attempts(&self) -> Option<u32> {
        match self {
            AppError::InvalidOtp { remaining_attempts, .. } => Some(*remaining_attempts),
            AppError::OtpAttemptsExceeded(_) => Some(0),
            _ => None,
        }
    }

    /// 클라이언트에 노출해도 되는 메시지
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg) => msg.clone(),
            AppError::OtpExpired(_)
            | AppError::InvalidOtp { .. }
            | AppError::OtpAttemptsExceeded(_)
            | AppError::TooManyRequests(_) => self.to_string(),
            AppError::DatabaseError(_)
            | AppError::RedisError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => "Internal server error".to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) | AppError::OtpExpired(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) | AppError::InvalidOtp { .. } => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::OtpAttemptsExceeded(_) | AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("🔥 {}", self);
        }

        let mut error = serde_json::json!({
            "code": self.kind(),
            "message": self.public_message(),
        });
        if let Some(remaining) = self.remaining_attempts() {
            error["remainingAttempts"] = serde_json::json!(remaining);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "error": error,
        }))
    }
}

/// 애플리케이션 결과 타입
pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러를 `AppError::InternalError`로 감싸는 확장 trait
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(error: redis::RedisError) -> Self {
        AppError::RedisError(error.to_string())
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        AppError::DatabaseError(error.to_string())
    }
}
