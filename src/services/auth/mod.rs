//! 인증 서비스 모듈
//!
//! 로그인 확인자, OTP 엔진, JWT 토큰 서비스, Google 연동을 제공합니다.
//!
//! # Features
//!
//! - 비밀번호 / OTP / Google 로그인을 하나의 사용자로 정규화 ([`AuthService`])
//! - HS256 액세스/리프레시 토큰 발급, 검증, 회전 ([`TokenService`])
//! - 6자리 OTP 발급과 시도 횟수 제한 ([`OtpService`])
//! - 재전송 쿨다운과 시간당 한도 ([`OtpThrottle`])
//! - Google OAuth 코드 교환과 사용자 정보 조회 ([`GoogleAuthService`])
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthService, OtpService, OtpThrottle};
//!
//! OtpThrottle::instance().check_and_record("a@x.com").await?;
//! OtpService::instance().issue("a@x.com").await?;
//!
//! let session = AuthService::instance().login_with_otp("a@x.com", "123456").await?;
//! ```

pub mod identity_provider;
pub mod token_service;
pub mod google_auth_service;
pub mod otp_service;
pub mod otp_throttle;
pub mod auth_service;

pub use identity_provider::IdentityProvider;
pub use token_service::TokenService;
pub use google_auth_service::GoogleAuthService;
pub use otp_service::OtpService;
pub use otp_throttle::OtpThrottle;
pub use auth_service::AuthService;
