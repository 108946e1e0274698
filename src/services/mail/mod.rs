//! 트랜잭션 메일 발송
//!
//! OTP 엔진은 [`MailTransport`]에만 의존하고, 운영 구현은 Zeptomail 템플릿 API를 호출합니다.

pub mod mail_transport;
pub mod zeptomail;

pub use mail_transport::MailTransport;
pub use zeptomail::ZeptomailTransport;
