//! Gmail 계정 연결 DTO

pub mod request;
pub mod response;

pub use request::ConnectGmailRequest;
pub use response::GmailAccountView;
