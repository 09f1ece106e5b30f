//! Navigation gate for the backoffice area.

pub const BACKOFFICE_PREFIX: &str = "/backoffice";
pub const BACKOFFICE_AUTH_PATH: &str = "/backoffice/auth";
pub const BACKOFFICE_ROOT: &str = "/backoffice";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

/// Decides whether a navigation may render or must be redirected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteGuard {
    protected_prefix: String,
    auth_path: String,
    protected_root: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(BACKOFFICE_PREFIX, BACKOFFICE_AUTH_PATH, BACKOFFICE_ROOT)
    }
}

impl RouteGuard {
    pub fn new(protected_prefix: &str, auth_path: &str, protected_root: &str) -> Self {
        Self {
            protected_prefix: protected_prefix.trim_end_matches('/').to_string(),
            auth_path: auth_path.to_string(),
            protected_root: protected_root.to_string(),
        }
    }

    pub fn auth_path(&self) -> &str {
        &self.auth_path
    }

    pub fn check(&self, path: &str, authenticated: bool) -> GuardDecision {
        let path = strip_query(path);
        let is_auth_page = path == self.auth_path;

        if self.is_protected(path) && !is_auth_page && !authenticated {
            return GuardDecision::Redirect(self.auth_path.clone());
        }

        if is_auth_page && authenticated {
            return GuardDecision::Redirect(self.protected_root.clone());
        }

        GuardDecision::Proceed
    }

    /// Plain prefix match: `/backoffice-reports` is protected too.
    fn is_protected(&self, path: &str) -> bool {
        path.starts_with(&self.protected_prefix)
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_user_is_sent_to_login() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.check("/backoffice", false),
            GuardDecision::Redirect("/backoffice/auth".into())
        );
        assert_eq!(
            guard.check("/backoffice/valuations?page=2", false),
            GuardDecision::Redirect("/backoffice/auth".into())
        );
    }

    #[test]
    fn login_page_is_open_to_anonymous_users() {
        let guard = RouteGuard::default();
        assert_eq!(guard.check("/backoffice/auth", false), GuardDecision::Proceed);
    }

    #[test]
    fn signed_in_user_skips_login_page() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.check("/backoffice/auth", true),
            GuardDecision::Redirect("/backoffice".into())
        );
    }

    #[test]
    fn everything_else_passes_through() {
        let guard = RouteGuard::default();
        assert_eq!(guard.check("/", false), GuardDecision::Proceed);
        assert_eq!(guard.check("/", true), GuardDecision::Proceed);
        assert_eq!(guard.check("/valuations", false), GuardDecision::Proceed);
        assert_eq!(guard.check("/backoffice", true), GuardDecision::Proceed);
    }

    #[test]
    fn prefix_siblings_are_protected() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.check("/backoffice-reports", false),
            GuardDecision::Redirect("/backoffice/auth".into())
        );
        assert_eq!(
            guard.check("/backofficex", false),
            GuardDecision::Redirect("/backoffice/auth".into())
        );
        assert_eq!(guard.check("/backoffice-reports", true), GuardDecision::Proceed);
    }
}
