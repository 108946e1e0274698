use async_trait::async_trait;

use crate::core::errors::AppResult;

/// 템플릿 메일 발송 추상화
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// 템플릿 메일을 보내고 제공자가 돌려준 메시지 ID를 반환합니다.
    ///
    /// `variables`는 템플릿 치환 값입니다 (예: `{"otp": "012345"}`).
    async fn send_templated_email(
        &self,
        recipient: &str,
        template_id: &str,
        variables: serde_json::Value,
    ) -> AppResult<String>;
}
