//! 사용자 인증 관련 DTO
//!
//! - `request`: 비밀번호 로그인, OTP 발송/검증, Google 로그인, 프로필 완성
//! - `response`: 민감 필드가 제거된 [`UserResponse`]와 로그인 결과 [`AuthSession`]

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
