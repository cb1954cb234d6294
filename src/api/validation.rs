use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

use super::error::FieldError;
use super::types::{RegisterRequest, UpdateUserRequest};
use super::ApiError;
use crate::models::user::{NewUser, UserChanges};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 8;

pub const MISSING_REGISTRATION_FIELDS: &str = "Username, email, and password are required";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
        )
        .expect("Invalid regex")
    })
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Lowercases the address. Gmail addresses also lose dots and any `+tag` in
/// the local part, and `googlemail.com` becomes `gmail.com`.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    let email = email.trim().to_lowercase();
    let Some((local, domain)) = email.rsplit_once('@') else {
        return email;
    };

    if domain == "gmail.com" || domain == "googlemail.com" {
        let local = local.split('+').next().unwrap_or_default().replace('.', "");
        format!("{local}@gmail.com")
    } else {
        email
    }
}

/// Accepts an ISO-8601 date or date-time and keeps the calendar date.
#[must_use]
pub fn parse_birthday(value: &str) -> Option<String> {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })?;

    Some(date.format("%Y-%m-%d").to_string())
}

fn check_username(field: &str, label: &str, value: &str, errors: &mut Vec<FieldError>) -> String {
    let trimmed = value.trim();
    if trimmed.chars().count() < MIN_USERNAME_LEN {
        errors.push(FieldError::body(
            field,
            format!("{label} must be at least {MIN_USERNAME_LEN} characters"),
        ));
    }
    trimmed.to_string()
}

fn check_email(field: &str, message: &str, value: &str, errors: &mut Vec<FieldError>) -> String {
    if !is_valid_email(value.trim()) {
        errors.push(FieldError::body(field, message));
    }
    normalize_email(value)
}

fn check_password(field: &str, label: &str, value: &str, errors: &mut Vec<FieldError>) {
    if value.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::body(
            field,
            format!("{label} must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }

    let rules: [(fn(&char) -> bool, &str); 3] = [
        (char::is_ascii_uppercase, "an uppercase letter"),
        (char::is_ascii_lowercase, "a lowercase letter"),
        (char::is_ascii_digit, "a number"),
    ];
    for (rule, requirement) in rules {
        if !value.chars().any(|c| rule(&c)) {
            errors.push(FieldError::body(
                field,
                format!("{label} must include {requirement}"),
            ));
        }
    }
}

fn check_birthday(
    field: &str,
    label: &str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let parsed = parse_birthday(value);
    if parsed.is_none() {
        errors.push(FieldError::body(
            field,
            format!("{label} must be an ISO date (YYYY-MM-DD)"),
        ));
    }
    parsed
}

/// Checks a registration payload. Every failing field is reported at once.
pub fn validate_registration(payload: &RegisterRequest) -> Result<NewUser, ApiError> {
    let (Some(username), Some(email), Some(password)) = (
        present(payload.username.as_ref()),
        present(payload.email.as_ref()),
        present(payload.password.as_ref()),
    ) else {
        return Err(ApiError::bad_request(MISSING_REGISTRATION_FIELDS));
    };

    let mut errors = Vec::new();
    let username = check_username("username", "Username", username, &mut errors);
    let email = check_email("email", "Email must be valid", email, &mut errors);
    check_password("password", "Password", password, &mut errors);
    let birthday = present(payload.birthday.as_ref())
        .and_then(|value| check_birthday("birthday", "Birthday", value, &mut errors));

    if !errors.is_empty() {
        return Err(ApiError::ValidationError(errors));
    }

    Ok(NewUser {
        username,
        email,
        password: password.to_string(),
        birthday,
    })
}

/// Checks a profile update payload. Absent or empty fields are skipped.
pub fn validate_update(payload: &UpdateUserRequest) -> Result<UserChanges, ApiError> {
    let mut errors = Vec::new();
    let mut changes = UserChanges::default();

    if let Some(value) = present(payload.new_username.as_ref()) {
        changes.username = Some(check_username(
            "newUsername",
            "newUsername",
            value,
            &mut errors,
        ));
    }
    if let Some(value) = present(payload.new_email.as_ref()) {
        changes.email = Some(check_email(
            "newEmail",
            "newEmail must be a valid email",
            value,
            &mut errors,
        ));
    }
    if let Some(value) = present(payload.new_password.as_ref()) {
        check_password("newPassword", "newPassword", value, &mut errors);
        changes.password = Some(value.to_string());
    }
    if let Some(value) = present(payload.new_birthday.as_ref()) {
        changes.birthday = check_birthday("newBirthday", "newBirthday", value, &mut errors);
    }

    if !errors.is_empty() {
        return Err(ApiError::ValidationError(errors));
    }

    Ok(changes)
}

/// Movie identifiers are UUIDs; returns the canonical hyphenated form.
pub fn validate_movie_id(id: &str) -> Result<String, ApiError> {
    uuid::Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|_| ApiError::bad_request("Invalid movieId"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            birthday: None,
        }
    }

    fn field_errors(err: ApiError) -> Vec<FieldError> {
        match err {
            ApiError::ValidationError(errors) => errors,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_valid_registration() {
        let mut payload = registration("  morticia ", "Morticia@Example.com", "Gomez1964");
        payload.birthday = Some("1964-09-18T00:00:00.000Z".to_string());

        let user = validate_registration(&payload).unwrap();
        assert_eq!(user.username, "morticia");
        assert_eq!(user.email, "morticia@example.com");
        assert_eq!(user.birthday.as_deref(), Some("1964-09-18"));
    }

    #[test]
    fn test_missing_fields_are_a_bad_request() {
        let mut payload = registration("morticia", "m@example.com", "Gomez1964");
        payload.email = None;
        assert!(matches!(
            validate_registration(&payload),
            Err(ApiError::BadRequest(msg)) if msg == MISSING_REGISTRATION_FIELDS
        ));

        let payload = registration("morticia", "m@example.com", "");
        assert!(matches!(
            validate_registration(&payload),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_all_field_errors_are_reported() {
        let errors = field_errors(
            validate_registration(&registration("ab", "not-an-email", "short")).unwrap_err(),
        );

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"username"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"password"));
        assert!(errors.iter().any(|e| e.message == "Password must be at least 8 characters"));
        assert!(errors.iter().any(|e| e.message == "Password must include an uppercase letter"));
        assert!(errors.iter().any(|e| e.message == "Password must include a number"));
        assert!(errors.iter().all(|e| e.location == "body"));
    }

    #[test]
    fn test_bad_birthday() {
        let mut payload = registration("morticia", "m@example.com", "Gomez1964");
        payload.birthday = Some("18/09/1964".to_string());
        let errors = field_errors(validate_registration(&payload).unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "birthday");
        assert_eq!(errors[0].message, "Birthday must be an ISO date (YYYY-MM-DD)");

        payload.birthday = Some(String::new());
        assert!(validate_registration(&payload).unwrap().birthday.is_none());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Wednesday@Addams.COM "), "wednesday@addams.com");
        assert_eq!(normalize_email("w.addams+school@gmail.com"), "waddams@gmail.com");
        assert_eq!(normalize_email("W.Addams@GoogleMail.com"), "waddams@gmail.com");
        assert_eq!(normalize_email("first.last@example.org"), "first.last@example.org");
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("lurch@addams.family"));
        assert!(is_valid_email("a+b@sub.example.co"));
        assert!(!is_valid_email("lurch"));
        assert!(!is_valid_email("lurch@"));
        assert!(!is_valid_email("lurch@localhost"));
        assert!(!is_valid_email("lu rch@example.com"));
    }

    #[test]
    fn test_update_skips_empty_fields() {
        let payload = UpdateUserRequest {
            new_username: Some(String::new()),
            new_email: None,
            new_password: None,
            new_birthday: Some(String::new()),
        };
        assert!(validate_update(&payload).unwrap().is_empty());
    }

    #[test]
    fn test_update_messages_use_new_prefix() {
        let payload = UpdateUserRequest {
            new_username: Some("x".to_string()),
            new_email: Some("nope".to_string()),
            new_password: Some("alllowercase1".to_string()),
            new_birthday: Some("tomorrow".to_string()),
        };
        let errors = field_errors(validate_update(&payload).unwrap_err());
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "newUsername must be at least 3 characters",
                "newEmail must be a valid email",
                "newPassword must include an uppercase letter",
                "newBirthday must be an ISO date (YYYY-MM-DD)",
            ]
        );
    }

    #[test]
    fn test_validate_movie_id() {
        let id = uuid::Uuid::new_v4().to_string();
        assert_eq!(validate_movie_id(&id).unwrap(), id);
        assert_eq!(
            validate_movie_id(&id.to_uppercase()).unwrap(),
            id,
            "canonicalized to lowercase"
        );
        assert!(matches!(
            validate_movie_id("123"),
            Err(ApiError::BadRequest(msg)) if msg == "Invalid movieId"
        ));
    }
}
