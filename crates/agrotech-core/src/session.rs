//! Local session shim.
//!
//! There is no authentication: any non-empty email/password pair "logs in"
//! after an artificial delay, and the resulting identity is persisted under
//! the user key.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DEFAULT_LOGIN_DELAY_MS;
use crate::models::{User, UserRole};
use crate::store::{CollectionKey, RecordStore, StoreError};

/// ID given to every locally created user.
pub const LOCAL_USER_ID: &str = "local-user";

/// Display name used when logging in without registering.
pub const GUEST_NAME: &str = "Visitante Agro";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Login form contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Only used when `registering`
    pub name: String,
    pub role: UserRole,
    pub registering: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    delay: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_LOGIN_DELAY_MS))
    }
}

impl Session {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Wait the configured delay, then create and persist the user.
    pub fn login<S: RecordStore>(&self, store: &S, request: LoginRequest) -> SessionResult<User> {
        let user = self.authenticate(request)?;
        self.start(store, &user)?;
        Ok(user)
    }

    /// Wait the configured delay and build the user. Touches no storage, so
    /// callers can run it without holding any lock.
    pub fn authenticate(&self, request: LoginRequest) -> SessionResult<User> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        if request.email.trim().is_empty() || request.password.is_empty() {
            debug!("login rejected: missing credentials");
            return Err(SessionError::MissingCredentials);
        }

        let name = if request.registering && !request.name.trim().is_empty() {
            request.name
        } else {
            GUEST_NAME.to_string()
        };

        Ok(User {
            id: LOCAL_USER_ID.to_string(),
            name,
            role: request.role,
            email: Some(request.email),
            phone: None,
        })
    }

    /// Persist `user` as the logged-in identity.
    pub fn start<S: RecordStore>(&self, store: &S, user: &User) -> SessionResult<()> {
        store.save(CollectionKey::User, user)?;
        info!(user = %user.name, role = user.role.label(), "session started");
        Ok(())
    }

    /// The persisted user, if anyone is logged in.
    pub fn current_user<S: RecordStore>(&self, store: &S) -> SessionResult<Option<User>> {
        Ok(store.load(CollectionKey::User, None)?)
    }

    pub fn logout<S: RecordStore>(&self, store: &S) -> SessionResult<()> {
        if store.clear(CollectionKey::User)? {
            info!("session ended");
        }
        Ok(())
    }
}
