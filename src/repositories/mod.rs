//! # Repository Layer
//!
//! MongoDB 컬렉션 접근 계층입니다. 서비스는 구체 타입 대신
//! [`UserStore`], [`GmailAccountStore`] trait에 의존하므로 테스트에서는
//! 메모리 구현으로 교체할 수 있습니다.
//!
//! | 리포지토리 | 컬렉션 | 캐시 |
//! |-----------|--------|------|
//! | [`UserRepository`](users::UserRepository) | `users` | ID 기준 Redis 캐시 (10분) |
//! | [`GmailAccountRepository`](gmail::GmailAccountRepository) | `gmail_accounts` | 없음 |

pub mod users;
pub mod gmail;

pub use users::{UserRepository, UserStore};
pub use gmail::{GmailAccountRepository, GmailAccountStore};

use crate::core::errors::AppResult;
use crate::core::registry::ServiceLocator;

/// 모든 컬렉션의 인덱스를 생성합니다. 서버 시작 시 한 번 호출합니다.
pub async fn create_all_indexes() -> AppResult<()> {
    ServiceLocator::get::<UserRepository>().create_indexes().await?;
    ServiceLocator::get::<GmailAccountRepository>().create_indexes().await?;
    log::info!("✅ MongoDB 인덱스 준비 완료");
    Ok(())
}

/// MongoDB 중복 키 에러(11000) 여부
pub(crate) fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    matches!(
        *error.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}
