use async_trait::async_trait;

use crate::core::errors::AppResult;
use crate::domain::models::oauth::{OAuthCredential, ProviderIdentity, ProviderTokens};

/// 외부 ID 제공자 (Google)
///
/// 로그인 확인자와 Gmail 연결 서비스가 공유합니다. 제공자 응답 실패, 시간 초과는
/// 모두 `ValidationError`로 돌려줍니다.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 인가 코드를 토큰으로 교환합니다. 액세스 토큰이 주어지면 그대로 사용합니다.
    async fn exchange(&self, credential: &OAuthCredential) -> AppResult<ProviderTokens>;

    async fn fetch_identity(&self, access_token: &str) -> AppResult<ProviderIdentity>;
}
