use serde::Deserialize;
use validator::{Validate, ValidationError};

fn validate_otp_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.len() == 6 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("otp_format").with_message("OTP must be 6 digits".into()))
    }
}

/// 비밀번호 로그인 (처음 보는 이메일이면 계정이 생성됩니다)
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(custom(function = "validate_otp_code"))]
    pub otp: String,
}

/// 클라이언트에서 받은 Google 액세스 토큰으로 로그인
#[derive(Debug, Deserialize, Validate)]
pub struct GoogleLoginRequest {
    #[validate(length(min = 1, message = "Google 토큰이 필요합니다"))]
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleUrlQuery {
    pub state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_otp_request_accepts_six_digits() {
        let request = VerifyOtpRequest {
            email: "a@x.com".to_string(),
            otp: "012345".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_verify_otp_request_rejects_letters_and_wrong_length() {
        for otp in ["12345", "1234567", "12a456", ""] {
            let request = VerifyOtpRequest {
                email: "a@x.com".to_string(),
                otp: otp.to_string(),
            };
            assert!(request.validate().is_err(), "accepted {:?}", otp);
        }
    }

    #[test]
    fn test_login_request_requires_valid_email() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "long-enough".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
