use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{AuthUser, LoginResponse, RouteGuard};
use crate::infra::api::{ApiClient, ApiClientError};
use crate::infra::session_store::SessionStore;

const LOGIN_PATH: &str = "/web/auth/login";
const LOGOUT_PATH: &str = "/v1/auth/logout";
const ME_PATH: &str = "/v1/auth/me";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Backoffice sign-in, sign-out and permission checks on top of the session store.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    session: Arc<SessionStore>,
    login_route: String,
}

impl AuthService {
    pub fn new(client: ApiClient, session: Arc<SessionStore>, guard: &RouteGuard) -> Self {
        Self {
            client,
            session,
            login_route: guard.auth_path().to_string(),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn can(&self, permission: &str) -> bool {
        self.session.can(permission)
    }

    /// Stores the returned token and user. On failure the session is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, ApiClientError> {
        let LoginResponse { token, user } = self
            .client
            .post_data(LOGIN_PATH, Some(&LoginRequest { email, password }))
            .await?;
        info!(user_id = user.id, "signed in");
        self.session.set_session(token, user.clone());
        Ok(user)
    }

    /// Ends the session locally no matter what the backend says, then returns the
    /// route the caller should navigate to.
    pub async fn logout(&self) -> String {
        if let Err(err) = self.client.post_discard(LOGOUT_PATH).await {
            warn!(error = %err, "backend logout failed; clearing local session anyway");
        }
        self.session.clear();
        info!("signed out");
        self.login_route.clone()
    }

    /// Re-reads the current user, e.g. after permissions changed server-side.
    pub async fn refresh_user(&self) -> Result<AuthUser, ApiClientError> {
        let user: AuthUser = self.client.get_data(ME_PATH).await?;
        self.session.set_user(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::interceptor::BearerTokenInterceptor;
    use crate::infra::test_support::MockBackend;
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    fn user_json(permissions: &[&str]) -> serde_json::Value {
        json!({
            "id": 5, "name": "Opio", "email": "opio@example.com",
            "phone": null, "role": "clerk", "permissions": permissions,
        })
    }

    fn service(base_url: &str) -> AuthService {
        let session = Arc::new(SessionStore::in_memory());
        let client = ApiClient::builder(base_url)
            .with_interceptor(Arc::new(BearerTokenInterceptor::new(session.clone())))
            .build()
            .unwrap();
        AuthService::new(client, session, &RouteGuard::default())
    }

    #[tokio::test]
    async fn login_stores_token_and_user() {
        let backend = MockBackend::new()
            .respond(
                Method::POST,
                "/api/web/auth/login",
                StatusCode::OK,
                json!({ "message": "", "data": { "token": "tok-9", "user": user_json(&["valuations.view"]) } }),
            )
            .spawn()
            .await;
        let auth = service(&backend.base_url());
        assert!(!auth.is_authenticated());

        let user = auth.login("opio@example.com", "hunter2").await.unwrap();
        assert_eq!(user.name, "Opio");
        assert!(auth.is_authenticated());
        assert!(auth.can("valuations.view"));
        assert!(!auth.can("valuations.edit"));
        assert_eq!(auth.session().token().as_deref(), Some("tok-9"));

        let recorded = backend.requests();
        assert_eq!(
            recorded[0].body,
            Some(json!({ "email": "opio@example.com", "password": "hunter2" }))
        );
        assert_eq!(recorded[0].authorization, None);
    }

    #[tokio::test]
    async fn failed_login_leaves_session_untouched() {
        let backend = MockBackend::new()
            .respond(
                Method::POST,
                "/api/web/auth/login",
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Invalid credentials" }),
            )
            .spawn()
            .await;
        let auth = service(&backend.base_url());

        let err = auth.login("opio@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(!auth.is_authenticated());
        assert_eq!(auth.session().user(), None);
    }

    #[tokio::test]
    async fn authenticated_requests_carry_bearer_token() {
        let backend = MockBackend::new()
            .respond(
                Method::POST,
                "/api/web/auth/login",
                StatusCode::OK,
                json!({ "message": "", "data": { "token": "tok-9", "user": user_json(&[]) } }),
            )
            .respond(
                Method::GET,
                "/api/v1/auth/me",
                StatusCode::OK,
                json!({ "message": "", "data": user_json(&["*"]) }),
            )
            .spawn()
            .await;
        let auth = service(&backend.base_url());
        auth.login("opio@example.com", "hunter2").await.unwrap();
        assert!(!auth.can("reports.export"));

        let refreshed = auth.refresh_user().await.unwrap();
        assert_eq!(refreshed.permissions, vec!["*".to_string()]);
        assert!(auth.can("reports.export"));
        assert_eq!(auth.session().token().as_deref(), Some("tok-9"));

        let recorded = backend.requests();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[1].path, "/api/v1/auth/me");
        assert_eq!(recorded[1].authorization.as_deref(), Some("Bearer tok-9"));
    }

    #[tokio::test]
    async fn logout_clears_session_even_when_backend_fails() {
        let backend = MockBackend::new()
            .respond(
                Method::POST,
                "/api/web/auth/login",
                StatusCode::OK,
                json!({ "message": "", "data": { "token": "tok-9", "user": user_json(&["*"]) } }),
            )
            .respond(
                Method::POST,
                "/api/v1/auth/logout",
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Server Error" }),
            )
            .spawn()
            .await;
        let auth = service(&backend.base_url());
        auth.login("opio@example.com", "hunter2").await.unwrap();

        let redirect = auth.logout().await;
        assert_eq!(redirect, "/backoffice/auth");
        assert!(!auth.is_authenticated());
        assert!(!auth.can("anything"));
        assert_eq!(auth.session().user(), None);

        let recorded = backend.requests();
        assert_eq!(recorded[1].path, "/api/v1/auth/logout");
        assert_eq!(recorded[1].authorization.as_deref(), Some("Bearer tok-9"));
    }

    #[tokio::test]
    async fn logout_survives_unreachable_backend() {
        // Nothing listens on loopback port 1.
        let auth = service("http://127.0.0.1:1/api");
        auth.session().set_session(
            "stale".into(),
            serde_json::from_value(user_json(&["*"])).unwrap(),
        );

        let redirect = auth.logout().await;
        assert_eq!(redirect, "/backoffice/auth");
        assert!(!auth.is_authenticated());
    }
}
