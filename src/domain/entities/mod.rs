//! # Domain Entities Module
//!
//! MongoDB 문서와 직접 매핑되는 엔티티입니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 이 모듈 (User, GmailAccount)
//! ├── models/       ← 토큰 클레임, OTP 레코드, 외부 ID 제공자 모델
//! └── dto/          ← 요청/응답 객체
//! ```
//!
//! | 엔티티 | 컬렉션 | 주요 인덱스 |
//! |--------|--------|-------------|
//! | `User` | `users` | `email` (unique), `(provider_id, provider)` |
//! | `GmailAccount` | `gmail_accounts` | `(user_id, email)` (unique), `(user_id, status)`, `(user_id, is_primary)` |

pub mod users;
pub mod gmail;

pub use users::*;
pub use gmail::*;
