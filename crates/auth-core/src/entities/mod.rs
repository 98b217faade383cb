//! Domain entities

mod credential;

pub use credential::CredentialRecord;
