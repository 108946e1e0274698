//! 사용자 서비스 모듈
//!
//! 인증된 사용자의 조회와 프로필 완성을 담당합니다.

pub mod user_service;

pub use user_service::UserService;
