//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델과 값 객체입니다.
//!
//! ```text
//! models/
//! ├── auth/     ← 인증된 요청 사용자, 인증 모드/역할 요구사항
//! ├── token/    ← JWT 클레임, 토큰 쌍
//! ├── otp/      ← OTP 레코드 (키-값 저장소에 저장)
//! └── oauth/    ← 외부 ID 제공자 자격 증명/토큰/신원
//! ```

pub mod auth;
pub mod token;
pub mod otp;
pub mod oauth;
