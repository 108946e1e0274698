//! Hirebox 인증 코어
//!
//! 멀티 테넌트 HR/채용 백엔드의 인증 및 토큰 수명주기를 담당하는 서비스입니다.
//! 비밀번호 로그인, 이메일 OTP 로그인, Google OAuth 로그인을 하나의 사용자 레코드로
//! 정규화하고, JWT 액세스/리프레시 토큰을 발급 및 회전시키며,
//! 요금제 한도에 따라 사용자별 Gmail 계정을 연결합니다.
//!
//! # Features
//!
//! - **로그인 통합**: 비밀번호 / OTP / Google 세 가지 경로를 하나의 사용자로 정규화
//! - **JWT 인증**: 15분 액세스 토큰 + 리프레시 토큰, 갱신 시 최신 사용자 상태로 클레임 재구성
//! - **OTP 엔진**: 6자리 코드, 10분 만료, 최대 5회 검증 시도
//! - **프로필 완성도**: 역할별 필수 필드 기반 순수 함수 평가
//! - **Gmail 연결**: 요금제 한도 검사, 기본 계정 단일성 유지, 소프트 삭제
//! - **싱글톤 DI**: `ServiceLocator` + `inventory` 기반 자동 등록
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증 / 응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 인증 코어 (OTP, 토큰, 로그인, Gmail)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore / GmailAccountStore / KeyValueStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use hirebox_auth::services::auth::{AuthService, TokenService};
//!
//! let auth_service = AuthService::instance();
//! let session = auth_service.login_with_password("a@x.com", "secret").await?;
//!
//! let token_service = TokenService::instance();
//! let rotated = token_service.refresh(&session.tokens.refresh_token).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(test)]
pub(crate) mod testing;
