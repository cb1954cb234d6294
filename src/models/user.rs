use serde::{Deserialize, Serialize};

/// A user as exposed by the API. The password hash never leaves the
/// repository layer, so it has no field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub birthday: Option<String>,
    pub favorites: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated registration input. `password` is still plaintext here; it is
/// hashed by the user repository before it is stored.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub birthday: Option<String>,
}

/// Validated partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub birthday: Option<String>,
}

impl UserChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.birthday.is_none()
    }
}
