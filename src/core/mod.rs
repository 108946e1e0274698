//! # Core Framework Module
//!
//! 인증 코어 전반이 공유하는 프레임워크 기능을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 전역 싱글톤 컨테이너
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 등록
//! - **의존성 해결**: `Arc<T>` 타입 기반 지연 생성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//! - **OTP 전용 변형**: 만료, 잘못된 코드(남은 시도 횟수 포함), 시도 초과
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! use hirebox_auth::core::registry::ServiceLocator;
//!
//! let database = Arc::new(Database::new().await?);
//! let redis = Arc::new(RedisClient::new().await?);
//!
//! ServiceLocator::set(database);
//! ServiceLocator::set(redis);
//! ServiceLocator::initialize_all().await?;
//! ```
//!
//! ## 트러블슈팅
//!
//! ### 미등록 타입 에러
//! ```text
//! panic: Service not found: MailService. Make sure it's registered...
//! ```
//! **해결**: `inventory::submit!`으로 등록하거나 `ServiceLocator::set()`으로 수동 등록

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
