//! Gmail 계정 연결 서비스 모듈

pub mod gmail_account_service;

pub use gmail_account_service::GmailAccountService;
