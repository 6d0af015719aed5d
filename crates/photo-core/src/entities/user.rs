//! User entity - the per-device identity of whoever is viewing

use serde::{Deserialize, Serialize};

use crate::value_objects::UserColor;

/// Identity attached to every reaction and comment a viewer creates.
///
/// Created once per device and immutable for the session; it is passed
/// explicitly into every engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub color: UserColor,
}

impl User {
    /// Create a new User
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: UserColor) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }

    /// Whether this user carries a usable id
    #[inline]
    pub fn has_identity(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Uppercased first character of the display name, for avatar badges
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}
