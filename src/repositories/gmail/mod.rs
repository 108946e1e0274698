pub mod gmail_store;
pub mod gmail_repo;

pub use gmail_store::GmailAccountStore;
pub use gmail_repo::GmailAccountRepository;
