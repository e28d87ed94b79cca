//! Account service
//!
//! Orchestrates registration (uniqueness check, hash, persist) and sign-in
//! (lookup, verify, issue token). This is the only caller of the password
//! hasher, the token issuer, and the account store.

use crate::auth::jwt::{issue_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taskboard_core::{Account, AccountStore, StoreError};
use utoipa::ToSchema;
use validator::Validate;

/// Account registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Sign-in request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Account service backed by an [`AccountStore`] and a signing config.
#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    jwt: JwtConfig,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStore>, jwt: JwtConfig) -> Self {
        Self { accounts, jwt }
    }

    /// Register a new account.
    ///
    /// The email is normalized to lowercase before the uniqueness check and
    /// before storage. The store's atomic insert is the authoritative guard
    /// against duplicates; the lookup beforehand only produces the friendly
    /// error without paying for a password hash.
    pub async fn register(&self, request: RegisterRequest) -> Result<Account, AppError> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();

        let existing = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if existing.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))?;

        let account = Account::new(request.name, email, password_hash);

        match self.accounts.insert_if_absent(account).await {
            Ok(created) => {
                tracing::info!(account_id = %created.id, "account registered");
                Ok(created)
            }
            // Lost the race with a concurrent registration for the same email
            Err(StoreError::Conflict) => {
                Err(AppError::Conflict("Email already registered".to_string()))
            }
            Err(e) => Err(AppError::Internal(e.to_string())),
        }
    }

    /// Sign in with email and password, returning a signed access token.
    ///
    /// Unknown email, wrong password, and an unreadable stored hash all
    /// collapse into the same `InvalidCredentials` outcome so the response
    /// reveals nothing about which accounts exist.
    pub async fn sign_in(&self, request: SignInRequest) -> Result<String, AppError> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();

        let account = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .ok_or(AppError::InvalidCredentials)?;

        let password_valid = match verify_password(&request.password, &account.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(account_id = %account.id, "stored hash unreadable: {e}");
                false
            }
        };

        if !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = issue_token(&self.jwt, &account)
            .map_err(|e| AppError::Internal(format!("failed to issue token: {e}")))?;

        tracing::info!(account_id = %account.id, "account signed in");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::verify_token;
    use crate::store::MemoryAccountStore;

    fn service() -> AccountService {
        let jwt = JwtConfig {
            secret: "test-secret-for-unit-tests".to_string(),
            validity_days: 365,
            issuer: "taskboard-api".to_string(),
        };
        AccountService::new(Arc::new(MemoryAccountStore::new()), jwt)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "A".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn register_persists_a_hashed_credential() {
        let svc = service();
        let account = svc.register(register_request("a@x.com")).await.unwrap();

        assert_ne!(account.password_hash, "secret1");
        assert!(verify_password("secret1", &account.password_hash).unwrap());

        let found = svc.accounts.find_by_email("a@x.com").await.unwrap();
        assert_eq!(found.unwrap().id, account.id);
    }

    #[tokio::test]
    async fn register_normalizes_email_case() {
        let svc = service();
        svc.register(register_request("User@X.com")).await.unwrap();

        let result = svc.register(register_request("user@x.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn register_rejects_invalid_email() {
        let svc = service();
        let result = svc.register(register_request("not-an-email")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn sign_in_returns_a_verifiable_token() {
        let svc = service();
        let account = svc.register(register_request("a@x.com")).await.unwrap();

        let token = svc
            .sign_in(SignInRequest {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        let claims = verify_token(&svc.jwt, &token).unwrap();
        assert_eq!(claims.sub, account.id.to_string());
        assert_eq!(claims.email, "a@x.com");
    }

    #[tokio::test]
    async fn sign_in_failures_are_indistinguishable() {
        let svc = service();
        svc.register(register_request("a@x.com")).await.unwrap();

        let wrong_password = svc
            .sign_in(SignInRequest {
                email: "a@x.com".to_string(),
                password: "nope".to_string(),
            })
            .await;
        let unknown_email = svc
            .sign_in(SignInRequest {
                email: "b@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn unreadable_stored_hash_is_a_credential_failure() {
        let svc = service();
        let broken = Account::new(
            "B".to_string(),
            "broken@x.com".to_string(),
            "garbage-hash".to_string(),
        );
        svc.accounts.insert_if_absent(broken).await.unwrap();

        let result = svc
            .sign_in(SignInRequest {
                email: "broken@x.com".to_string(),
                password: "whatever".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }
}
