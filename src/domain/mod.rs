//! # Domain Layer Module
//!
//! 인증 코어의 도메인 계층입니다. 저장 대상 엔티티, API 경계의 DTO,
//! 토큰/OTP/OAuth 같은 내부 모델을 나눠서 정의합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - MongoDB에 저장되는 User, GmailAccount
//! ├── DTOs      - 요청 검증 / 응답 직렬화 (camelCase)
//! └── Models    - JWT 클레임, OTP 레코드, 외부 제공자 신원
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, Redis, MongoDB)
//! ```
//!
//! ## 규칙
//!
//! - 엔티티는 API 응답으로 직접 나가지 않습니다. 비밀번호 해시와 OAuth 토큰은
//!   항상 [`dto`]의 응답 타입을 거쳐 제거됩니다.
//! - 프로필 완성 여부 같은 파생 값은 엔티티 메서드로만 다시 계산합니다.
//! - `dto`는 이름이 겹치는 하위 모듈(`users`)이 있어 경로로 접근합니다.
//!
//! ```rust,ignore
//! use hirebox_auth::domain::{User, UserClaims};
//! use hirebox_auth::domain::dto::users::response::UserResponse;
//!
//! let claims = UserClaims::from_user(&user);
//! let body = UserResponse::from(&user);
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use models::auth::AuthenticatedUser;
pub use models::oauth::{OAuthCredential, ProviderIdentity, ProviderTokens};
pub use models::otp::{OtpIssued, OtpRecord, OtpVerified};
pub use models::token::{TokenClaims, TokenPair, UserClaims};
