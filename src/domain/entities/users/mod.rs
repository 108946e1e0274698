//! Users Entity Module
//!
//! 사용자 엔티티와 프로필 완성도 평가 로직을 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{User, ProfileUpdate};
//!
//! let mut user = User::new_verified_email("hr@acme.com");
//! let update = ProfileUpdate::new("Alice", Some(UserRole::Hr), Some(HrType::Company),
//!     Some("Acme".into()), None, None)?;
//! user.apply_profile_update(update);
//! assert!(user.is_profile_complete);
//! ```

pub mod user;
pub mod profile;

pub use user::{HrDetails, HrType, User, UserRole};
pub use profile::{is_profile_complete, ProfileUpdate};
