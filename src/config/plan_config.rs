//! 요금제 설정
//!
//! 요금제별 이름, Gmail 계정 연결 한도, 기능 플래그를 정의합니다.
//! `max_gmail_accounts`가 `-1`이면 무제한입니다.

use serde::{Deserialize, Serialize};

/// 사용자 요금제
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Free,
    Basic,
    Pro,
}

impl PlanType {
    /// 알 수 없는 값은 `Free`로 처리합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "basic" => PlanType::Basic,
            "pro" => PlanType::Pro,
            _ => PlanType::Free,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFeatures {
    pub email_scanning: bool,
    pub ai_classification: bool,
    pub auto_replies: bool,
    pub interview_scheduling: bool,
    pub analytics: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanConfig {
    pub name: &'static str,
    pub max_gmail_accounts: i64,
    pub features: PlanFeatures,
}

pub const UNLIMITED: i64 = -1;

const FREE: PlanConfig = PlanConfig {
    name: "Free",
    max_gmail_accounts: 1,
    features: PlanFeatures {
        email_scanning: true,
        ai_classification: false,
        auto_replies: false,
        interview_scheduling: false,
        analytics: false,
    },
};

const BASIC: PlanConfig = PlanConfig {
    name: "Basic",
    max_gmail_accounts: 5,
    features: PlanFeatures {
        email_scanning: true,
        ai_classification: true,
        auto_replies: true,
        interview_scheduling: true,
        analytics: false,
    },
};

const PRO: PlanConfig = PlanConfig {
    name: "Pro",
    max_gmail_accounts: UNLIMITED,
    features: PlanFeatures {
        email_scanning: true,
        ai_classification: true,
        auto_replies: true,
        interview_scheduling: true,
        analytics: true,
    },
};

impl PlanConfig {
    pub fn for_plan(plan: PlanType) -> &'static PlanConfig {
        match plan {
            PlanType::Free => &FREE,
            PlanType::Basic => &BASIC,
            PlanType::Pro => &PRO,
        }
    }

    pub fn max_gmail_accounts(plan: PlanType) -> i64 {
        Self::for_plan(plan).max_gmail_accounts
    }

    pub fn plan_name(plan: PlanType) -> &'static str {
        Self::for_plan(plan).name
    }

    /// 현재 연결된 계정 수에서 하나를 더 추가할 수 있는지 판단합니다.
    pub fn can_add_gmail_account(plan: PlanType, current_count: u64) -> bool {
        let max = Self::max_gmail_accounts(plan);
        max == UNLIMITED || (current_count as i64) < max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_limits() {
        assert_eq!(PlanConfig::max_gmail_accounts(PlanType::Free), 1);
        assert_eq!(PlanConfig::max_gmail_accounts(PlanType::Basic), 5);
        assert_eq!(PlanConfig::max_gmail_accounts(PlanType::Pro), UNLIMITED);
        assert_eq!(PlanConfig::plan_name(PlanType::Basic), "Basic");
    }

    #[test]
    fn test_can_add_gmail_account() {
        assert!(PlanConfig::can_add_gmail_account(PlanType::Free, 0));
        assert!(!PlanConfig::can_add_gmail_account(PlanType::Free, 1));
        assert!(PlanConfig::can_add_gmail_account(PlanType::Basic, 4));
        assert!(!PlanConfig::can_add_gmail_account(PlanType::Basic, 5));
        assert!(PlanConfig::can_add_gmail_account(PlanType::Pro, 10_000));
    }

    #[test]
    fn test_unknown_plan_falls_back_to_free() {
        assert_eq!(PlanType::from_str("enterprise"), PlanType::Free);
        assert_eq!(PlanType::from_str("PRO"), PlanType::Pro);
    }
}
