/// Mock authentication state
// Any non-empty username and password is accepted. Only `is_authenticated`
// is durable; `logout_initiated` is gone after a reload.
mod storage;

pub use storage::{FileFlagStorage, FlagStorage, MemoryFlagStorage};

use crate::errors::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Durable key holding `"true"` while logged in
pub const AUTH_FLAG_KEY: &str = "isAuthenticated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    Anonymous,
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub logout_initiated: bool,
}

impl AuthState {
    pub fn phase(&self) -> AuthPhase {
        if self.is_authenticated {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        }
    }
}

/// Login form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> ApiResult<()> {
        if self.username.trim().is_empty() {
            return Err(ApiError::Validation("username is required".to_string()));
        }
        if self.password.trim().is_empty() {
            return Err(ApiError::Validation("password is required".to_string()));
        }
        Ok(())
    }
}

pub struct AuthStore {
    state: RwLock<AuthState>,
    storage: Arc<dyn FlagStorage>,
}

impl AuthStore {
    /// Hydrate from durable storage
    pub fn new(storage: Arc<dyn FlagStorage>) -> Self {
        let is_authenticated = match storage.get(AUTH_FLAG_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!("Could not read auth flag, starting anonymous: {}", e);
                false
            }
        };

        Self {
            state: RwLock::new(AuthState {
                is_authenticated,
                logout_initiated: false,
            }),
            storage,
        }
    }

    pub fn snapshot(&self) -> AuthState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated
    }

    /// The state lock is held across the storage write so memory and disk agree
    pub fn login(&self) -> ApiResult<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        self.storage.set(AUTH_FLAG_KEY, "true")?;
        state.is_authenticated = true;
        state.logout_initiated = false;
        info!("User logged in");
        Ok(())
    }

    pub fn logout(&self) -> ApiResult<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        self.storage.remove(AUTH_FLAG_KEY)?;
        state.is_authenticated = false;
        state.logout_initiated = true;
        info!("User logged out");
        Ok(())
    }

    /// Validate the login form, then log in
    pub fn authenticate(&self, form: &LoginForm) -> ApiResult<()> {
        form.validate()?;
        self.login()
    }
}
