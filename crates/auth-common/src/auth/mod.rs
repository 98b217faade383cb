//! Authentication primitives: password hashing and signed tokens

mod jwt;
mod password;

pub use jwt::{Claims, TokenError, TokenService};
pub use password::PasswordHasher;
