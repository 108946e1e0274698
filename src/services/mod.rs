//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `OnceCell` 싱글톤으로 관리되며 `inventory`를 통해 `ServiceLocator`에 등록됩니다.
//! 모든 서비스는 협력자를 trait 객체로 받는 생성자도 제공하므로 메모리 구현으로 테스트할 수 있습니다.
//!
//! - [`auth`]: 로그인, OTP, JWT, Google 연동
//! - [`users`]: 현재 사용자 조회와 프로필 완성
//! - [`gmail`]: Gmail 계정 연결과 기본 계정 관리
//! - [`mail`]: 트랜잭션 메일 발송
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::TokenService, users::UserService};
//!
//! let user_service = UserService::instance();
//! let token_service = TokenService::instance();
//! ```

pub mod auth;
pub mod users;
pub mod gmail;
pub mod mail;
