//! Authentication and authorization
//!
//! - Token issuance and verification (`jwt`)
//! - Password hashing with Argon2 (`password`)
//! - The bearer-token gate for mutating routes (`middleware`)
//! - The account service orchestrating registration and sign-in (`service`)

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;

pub use jwt::{issue_token, verify_token, Claims, JwtConfig, JwtError};
pub use middleware::{require_auth, AuthError, AuthenticatedAccount};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::{AccountService, RegisterRequest, SignInRequest};
