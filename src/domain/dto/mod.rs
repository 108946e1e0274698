//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 타입입니다.
//!
//! | 관심사 | 도구 |
//! |--------|------|
//! | JSON 필드 매핑 | `serde` (`rename_all = "camelCase"`) |
//! | 입력값 검증 | `validator` (`#[derive(Validate)]`) |
//! | 에러 응답 | [`AppError`](crate::core::errors::AppError)의 `ResponseError` 구현 |
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── users/       # 로그인, OTP, 프로필 완성 요청 / 사용자, 세션 응답
//! ├── gmail/       # Gmail 연결 요청 / 토큰이 제거된 계정 뷰
//! └── tokens/      # 토큰 갱신 요청 / 공통 ApiResponse 래퍼
//! ```
//!
//! 요청 DTO는 형식만 검증합니다. 역할별 HR 필드 규칙처럼 여러 필드에 걸친 규칙은
//! 도메인 타입([`ProfileUpdate`](crate::domain::entities::users::ProfileUpdate))으로
//! 변환하면서 검사합니다.

pub mod users;
pub mod gmail;
pub mod tokens;

pub use tokens::response::ApiResponse;
