//! OTP 레코드
//!
//! 키-값 저장소에 JSON으로 저장되는 일회용 코드입니다. 이메일당 하나만 존재하며
//! 재전송 시 덮어쓰고, 검증 성공 또는 시도 초과 시 즉시 삭제됩니다.

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRecord {
    pub code: String,
    pub email: String,
    /// 발급 시점의 시도 횟수. 검증 중 갱신되지 않으며 진행 중인 횟수는 `otp:attempts` 카운터가 기준입니다.
    pub attempts: u32,
    /// 생성 시각 (epoch millis)
    pub created_at: i64,
}

impl std::fmt::Debug for OtpRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpRecord")
            .field("email", &self.email)
            .field("attempts", &self.attempts)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// `issue` 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpIssued {
    pub success: bool,
    pub expires_in_seconds: u64,
}

/// `verify` 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerified {
    pub success: bool,
    pub email: String,
}
