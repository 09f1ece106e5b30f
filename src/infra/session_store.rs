use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::domain::{AuthUser, Session};
use crate::infra::cookies::{
    CookieJar, CookieOptions, MemoryCookieJar, AUTH_TOKEN_COOKIE, AUTH_USER_COOKIE,
};

/// Holds the current session and mirrors every change into a cookie jar.
///
/// The in-memory value is authoritative for the running process; a failed cookie
/// write is logged and otherwise ignored.
pub struct SessionStore {
    state: RwLock<Session>,
    jar: Arc<dyn CookieJar>,
    options: CookieOptions,
}

impl SessionStore {
    /// Rebuilds the session from whatever the jar still holds.
    pub fn restore(jar: Arc<dyn CookieJar>) -> Self {
        let token = jar.get(AUTH_TOKEN_COOKIE);
        let user = jar
            .get(AUTH_USER_COOKIE)
            .and_then(|raw| match serde_json::from_str::<AuthUser>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(error = %err, "discarding unreadable {AUTH_USER_COOKIE} cookie");
                    None
                }
            });

        debug!(
            authenticated = token.is_some(),
            has_user = user.is_some(),
            "restored session from cookies"
        );

        Self {
            state: RwLock::new(Session { token, user }),
            jar,
            options: CookieOptions::SESSION,
        }
    }

    pub fn in_memory() -> Self {
        Self::restore(Arc::new(MemoryCookieJar::new()))
    }

    pub fn snapshot(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    #[cfg(test)]
    pub fn user(&self) -> Option<AuthUser> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    pub fn can(&self, permission: &str) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .can(permission)
    }

    /// Replaces token and user together.
    pub fn set_session(&self, token: String, user: AuthUser) {
        self.persist_token(Some(&token));
        self.persist_user(Some(&user));
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Session::new(token, user);
    }

    pub fn set_user(&self, user: AuthUser) {
        self.persist_user(Some(&user));
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .user = Some(user);
    }

    pub fn clear(&self) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
        self.persist_token(None);
        self.persist_user(None);
    }

    fn persist_token(&self, token: Option<&str>) {
        let result = match token {
            Some(token) => self.jar.set(AUTH_TOKEN_COOKIE, token, &self.options),
            None => self.jar.remove(AUTH_TOKEN_COOKIE),
        };
        if let Err(err) = result {
            warn!(error = %err, "failed to persist {AUTH_TOKEN_COOKIE} cookie");
        }
    }

    fn persist_user(&self, user: Option<&AuthUser>) {
        let result = match user {
            Some(user) => match serde_json::to_string(user) {
                Ok(json) => self.jar.set(AUTH_USER_COOKIE, &json, &self.options),
                Err(err) => Err(err.into()),
            },
            None => self.jar.remove(AUTH_USER_COOKIE),
        };
        if let Err(err) = result {
            warn!(error = %err, "failed to persist {AUTH_USER_COOKIE} cookie");
        }
    }
}
