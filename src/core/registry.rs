//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! 인증 코어의 서비스/리포지토리 인스턴스를 관리하는 전역 컨테이너입니다.
//!
//! ## 동작 방식
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[repository] 매크로 → RepositoryRegistration 생성
//!    ├─ inventory::submit! → ServiceRegistration 수동 등록
//!    └─ inventory::collect! → 전역 레지스트리에 수집
//!
//! 2. 런타임 초기화
//!    ├─ Database, RedisClient 등 인프라 컴포넌트 직접 등록
//!    └─ ServiceLocator::set() → 전역 컨테이너에 저장
//!
//! 3. 의존성 해결
//!    ├─ ServiceLocator::get::<T>() 호출
//!    ├─ 타입 이름 정규화 → 등록 이름과 매칭
//!    └─ 생성 후 캐싱 → 이후 요청은 캐시된 인스턴스 반환
//! ```
//!
//! 타입 이름과 등록 이름은 접미사(`Service`, `_repository` 등)와 밑줄을 제거한
//! 소문자 형태로 비교됩니다. 따라서 `GmailAccountService`는 `gmail_account_service`
//! 등록과 매칭됩니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
#[async_trait]
pub trait Service: Send + Sync {
    /// 서비스의 고유 이름
    fn name(&self) -> &str;

    /// 서비스 초기화 로직
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// 모든 `#[repository]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리의 고유 이름
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션의 이름
    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 초기화 작업
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
pub struct ServiceRegistration {
    /// 서비스의 고유 이름 (검색 키로 사용)
    pub name: &'static str,
    /// 인스턴스 생성 함수
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_name(registration.name), registration))
        .collect();
    log::debug!("🗂️ Service 이름 캐시 초기화: {}개", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_name(registration.name), registration))
        .collect();
    log::debug!("🗂️ Repository 이름 캐시 초기화: {}개", cache.len());
    cache
});

/// 등록 이름이나 타입 이름을 비교 가능한 키로 정규화합니다.
///
/// `gmail_account_service`, `GmailAccountService`, `gmail_account` 모두 `gmailaccount`가 됩니다.
fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase().replace('_', "");
    for suffix in ["repository", "service"] {
        if let Some(stripped) = lowered.strip_suffix(suffix) {
            if !stripped.is_empty() {
                return stripped.to_string();
            }
        }
    }
    lowered
}

/// `a::b::TypeName` 에서 `TypeName`만 추출합니다.
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 싱글톤 의존성 주입 컨테이너
///
/// # 주요 기능
/// - **싱글톤 보장**: 각 타입당 정확히 하나의 인스턴스만 생성
/// - **지연 초기화**: 첫 요청 시점에 인스턴스 생성
/// - **순환 참조 감지**: 생성 중인 타입을 다시 요청하면 즉시 패닉
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn read_instances(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_instances(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_initializing(&self) -> RwLockWriteGuard<'_, HashSet<TypeId>> {
        self.initializing.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 타입 `T`의 싱글톤 인스턴스를 반환합니다.
    ///
    /// 등록된 인스턴스가 없으면 레지스트리에서 생성자를 찾아 생성합니다.
    ///
    /// # Panics
    ///
    /// 등록되지 않은 타입이거나 순환 참조가 감지되면 패닉합니다.
    /// 둘 다 시작 시점의 구성 오류입니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = LOCATOR.read_instances().get(&type_id) {
            if let Ok(typed) = instance.clone().downcast::<T>() {
                return typed;
            }
        }

        {
            let mut initializing = LOCATOR.write_initializing();
            if !initializing.insert(type_id) {
                log::error!("❌ 순환 의존성 감지: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let created = Self::create_from_registry::<T>(type_name);
        LOCATOR.write_initializing().remove(&type_id);

        match created {
            Some(instance) => {
                LOCATOR
                    .write_instances()
                    .entry(type_id)
                    .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>);
                instance
            }
            None => panic!(
                "Service not found: {}. Make sure it's registered with #[repository] or inventory::submit!, or manually registered with ServiceLocator::set()",
                type_name
            ),
        }
    }

    fn create_from_registry<T: 'static + Send + Sync>(type_name: &str) -> Option<Arc<T>> {
        let short_name = short_type_name(type_name);
        let key = normalize_name(short_name);

        let boxed = if short_name.ends_with("Repository") {
            REPOSITORY_NAME_CACHE.get(&key).map(|registration| (registration.constructor)())
        } else {
            SERVICE_NAME_CACHE.get(&key).map(|registration| (registration.constructor)())
        }?;

        match boxed.downcast::<Arc<T>>() {
            Ok(arc_instance) => Some(*arc_instance),
            Err(_) => {
                log::error!("❌ 등록된 생성자의 타입이 일치하지 않습니다: {}", type_name);
                None
            }
        }
    }

    /// 외부에서 생성한 인스턴스를 직접 등록합니다.
    ///
    /// Database, RedisClient처럼 비동기 연결이 필요한 인프라 컴포넌트에 사용합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        log::info!("📦 Registering: {}", short_type_name(std::any::type_name::<T>()));
        LOCATOR
            .write_instances()
            .insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 생성한 뒤 서비스를 생성합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        log::info!("🔄 서비스 레지스트리 초기화 시작");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        for registration in &repo_registrations {
            let _instance = (registration.constructor)();
            log::debug!("  ✓ repository 생성: {}", registration.name);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        for registration in &service_registrations {
            let _instance = (registration.constructor)();
            log::debug!("  ✓ service 생성: {}", registration.name);
        }

        log::info!(
            "✅ 레지스트리 초기화 완료: repository {}개, service {}개",
            repo_registrations.len(),
            service_registrations.len()
        );
        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_strips_suffix_and_underscores() {
        assert_eq!(normalize_name("gmail_account_service"), "gmailaccount");
        assert_eq!(normalize_name("GmailAccountService"), "gmailaccount");
        assert_eq!(normalize_name("user_repository"), "user");
        assert_eq!(normalize_name("UserRepository"), "user");
        assert_eq!(normalize_name("gmail_account"), "gmailaccount");
    }

    #[test]
    fn test_normalize_name_keeps_bare_suffix() {
        assert_eq!(normalize_name("service"), "service");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("hirebox_auth::services::auth::OtpService"), "OtpService");
        assert_eq!(short_type_name("OtpService"), "OtpService");
    }

    struct ManualComponent {
        value: u32,
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(ManualComponent { value: 42 }));
        let first = ServiceLocator::get::<ManualComponent>();
        let second = ServiceLocator::get::<ManualComponent>();
        assert_eq!(first.value, 42);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
