// Session: the local-storage auth stub.
// Storage is an injected capability (`SessionStore`); nothing here assumes a
// browser, a file or a server.

pub mod handlers;
pub mod store;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::user::AuthUser;
use crate::session::store::{SessionStore, StoreError};

/// Key under which the signed-in user is stashed.
pub const SESSION_KEY: &str = "careerCampus_user";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    fn default_name(&self) -> &'static str {
        match self {
            AuthMode::Login => "Demo User",
            AuthMode::Signup => "New User",
        }
    }
}

/// Simulated sign-in. No password check, no uniqueness check.
pub fn sign_in(mode: AuthMode, name: Option<&str>, email: &str) -> AuthUser {
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(mode.default_name());
    AuthUser {
        name: name.to_string(),
        email: email.trim().to_string(),
    }
}

/// Parses a stored record. Any failure means "logged out".
pub fn parse_stored_user(raw: &str) -> Option<AuthUser> {
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Discarding unreadable session record: {e}");
            None
        }
    }
}

/// Reads the stored user. A corrupt record is removed and treated as absent.
pub fn load_user<S: SessionStore + ?Sized>(
    store: &mut S,
) -> Result<Option<AuthUser>, StoreError> {
    let Some(raw) = store.get(SESSION_KEY)? else {
        return Ok(None);
    };
    match parse_stored_user(&raw) {
        Some(user) => Ok(Some(user)),
        None => {
            store.remove(SESSION_KEY)?;
            Ok(None)
        }
    }
}

pub fn save_user<S: SessionStore + ?Sized>(
    store: &mut S,
    user: &AuthUser,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(user)?;
    store.set(SESSION_KEY, &raw)
}

pub fn clear_user<S: SessionStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove(SESSION_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::MemorySessionStore;

    #[test]
    fn test_sign_in_defaults_blank_names() {
        assert_eq!(sign_in(AuthMode::Login, None, "a@x.in").name, "Demo User");
        assert_eq!(sign_in(AuthMode::Signup, Some("  "), "a@x.in").name, "New User");
        assert_eq!(sign_in(AuthMode::Signup, Some("Riya"), "a@x.in").name, "Riya");
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemorySessionStore::default();
        let user = sign_in(AuthMode::Signup, Some("Riya"), "riya@example.com");
        save_user(&mut store, &user).unwrap();

        assert_eq!(
            store.get(SESSION_KEY).unwrap().as_deref(),
            Some(r#"{"name":"Riya","email":"riya@example.com"}"#)
        );
        assert_eq!(load_user(&mut store).unwrap(), Some(user));
    }

    #[test]
    fn test_corrupt_record_is_discarded() {
        let mut store = MemorySessionStore::default();
        store.set(SESSION_KEY, "{not json").unwrap();

        assert_eq!(load_user(&mut store).unwrap(), None);
        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_missing_record_is_logged_out() {
        let mut store = MemorySessionStore::default();
        assert_eq!(load_user(&mut store).unwrap(), None);
    }

    #[test]
    fn test_clear_user() {
        let mut store = MemorySessionStore::default();
        save_user(&mut store, &sign_in(AuthMode::Login, None, "d@x.in")).unwrap();
        clear_user(&mut store).unwrap();
        assert_eq!(load_user(&mut store).unwrap(), None);
    }
}
