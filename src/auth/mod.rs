//! Registration and login
//!
//! Both operations are single-shot request/response cycles over the user
//! store: register performs at most one insert guarded by a prior read,
//! login performs no writes at all.

pub mod password;
pub mod token;

pub use token::{Claims, TokenIssuer};

use crate::core::error::{ApiResult, AuthError, StoreError};
use crate::core::store::UserStore;
use crate::core::user::User;
use serde::Deserialize;
use std::sync::Arc;

/// Request body for `POST /api/v1/register`
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/v1/login`
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration and login over a [`UserStore`]
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    /// Register a new user
    ///
    /// The pre-insert existence check is a fast path for a friendlier
    /// error; the store's unique email constraint is the authoritative
    /// guard, so a racing duplicate insert also resolves to
    /// [`AuthError::DuplicateUser`].
    pub async fn register(&self, request: RegisterRequest) -> ApiResult<()> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::DuplicateUser.into());
        }

        let password_hash = password::hash(&request.password)?;
        let user = User::new(request.name, request.email, password_hash);

        match self.users.insert(user).await {
            Ok(_) => {
                tracing::info!("registered new user");
                Ok(())
            }
            Err(StoreError::Duplicate { .. }) => Err(AuthError::DuplicateUser.into()),
            Err(err) => Err(err.into()),
        }
    }

    /// Authenticate a user and issue a signed token
    ///
    /// Unknown email and wrong password take the same error path so the
    /// response never reveals whether an account exists.
    pub async fn login(&self, request: LoginRequest) -> ApiResult<String> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify(&request.password, &user.password_hash)? {
            tracing::debug!("login failed: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(self.tokens.issue(&user.email, user.role)?)
    }
}
