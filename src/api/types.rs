use serde::Deserialize;

/// `POST /users` body. Fields are optional so a missing one can be reported
/// as a 400 rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub birthday: Option<String>,
}

/// `PUT /users/{username}` body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub new_username: Option<String>,
    pub new_email: Option<String>,
    pub new_password: Option<String>,
    pub new_birthday: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}
