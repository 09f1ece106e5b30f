use super::entities::AuthUser;

/// Client-side view of the authenticated session.
///
/// Token and user travel together so a login or logout replaces both in one write.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<AuthUser>,
}

impl Session {
    pub fn new(token: String, user: AuthUser) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// True when a user is stored and holds `permission` or the wildcard.
    pub fn can(&self, permission: &str) -> bool {
        self.user
            .as_ref()
            .map(|user| user.has_permission(permission))
            .unwrap_or(false)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(permissions: &[&str]) -> AuthUser {
        AuthUser {
            id: 1,
            name: "Grace".into(),
            email: "grace@example.com".into(),
            phone: None,
            role: Some("admin".into()),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn wildcard_grants_everything() {
        let session = Session::new("t".into(), user(&["*"]));
        assert!(session.can("valuations.delete"));
        assert!(session.can(""));
    }

    #[test]
    fn exact_permission_only() {
        let session = Session::new("t".into(), user(&["valuations.view"]));
        assert!(session.can("valuations.view"));
        assert!(!session.can("valuations.edit"));
        assert!(!session.can("valuations"));
    }

    #[test]
    fn no_user_denies_all() {
        let session = Session {
            token: Some("t".into()),
            user: None,
        };
        assert!(!session.can("*"));
        assert!(!session.can("valuations.view"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn authentication_follows_token() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());
        session.token = Some("abc".into());
        assert!(session.is_authenticated());
    }
}
