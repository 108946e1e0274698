//! Gmail 계정 엔티티 모듈

pub mod gmail_account;

pub use gmail_account::{GmailAccount, GmailAccountStatus};
