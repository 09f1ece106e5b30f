use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;
use tracing::warn;

use crate::infra::session_store::SessionStore;

/// Hook run on every outgoing request before it is sent.
pub trait RequestInterceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn intercept(&self, request: &mut Request);
}

/// Adds `Authorization: Bearer <token>` while a session token is stored.
pub struct BearerTokenInterceptor {
    session: Arc<SessionStore>,
}

impl BearerTokenInterceptor {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for BearerTokenInterceptor {
    fn name(&self) -> &'static str {
        "bearer-token"
    }

    fn intercept(&self, request: &mut Request) {
        let Some(token) = self.session.token() else {
            return;
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(err) => {
                warn!(error = %err, "stored token is not a valid header value; sending without it");
            }
        }
    }
}
