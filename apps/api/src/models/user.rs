use serde::{Deserialize, Serialize};

/// Signed-in user as stashed in the browser's local store. There is no
/// server-side identity behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub name: String,
    pub email: String,
}

impl AuthUser {
    /// Avatar initial shown in the navigation bar.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().and_then(|c| c.to_uppercase().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_is_uppercased() {
        let user = AuthUser {
            name: "meera".to_string(),
            email: "meera@example.com".to_string(),
        };
        assert_eq!(user.initial(), Some('M'));
    }

    #[test]
    fn test_stored_shape_is_name_and_email() {
        let user = AuthUser {
            name: "A".to_string(),
            email: "a@b.c".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({"name": "A", "email": "a@b.c"})
        );
    }
}
