use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::repo_types::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for registration. Missing fields fall through to field
/// validation instead of failing deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

impl RegisterRequest {
    /// Explicit field validation, one message per offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = BTreeMap::new();
        if self.username.trim().is_empty() {
            errors.insert("username", "Username is required".to_string());
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required".to_string());
        }
        let email = self.email.trim();
        if !email.is_empty() && !is_valid_email(email) {
            errors.insert("email", "Email is not a valid address".to_string());
        }
        if self.full_name.trim().is_empty() {
            errors.insert("fullName", "Full name is required".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

/// Public part of the user returned to clients. Never carries the hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub enabled: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            enabled: user.enabled,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str, email: &str, full_name: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            full_name: full_name.into(),
        }
    }

    #[test]
    fn empty_request_reports_every_required_field() {
        let err = request("", "", "", "").validate().unwrap_err();
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("fullName"));
        // blank email is allowed
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let err = request("bob", "pw123456", "not-an-email", "Bob B")
            .validate()
            .unwrap_err();
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn complete_request_validates() {
        assert!(request("bob", "pw123456", "bob@x.com", "Bob B")
            .validate()
            .is_ok());
        assert!(request("bob", "pw123456", "", "Bob B").validate().is_ok());
    }

    #[test]
    fn public_user_serialization_excludes_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "bob".into(),
            password_hash: "$argon2id$secret".into(),
            email: Some("bob@x.com".into()),
            full_name: Some("Bob B".into()),
            enabled: true,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("bob@x.com"));
        assert!(json.contains("fullName"));
        assert!(!json.contains("argon2"));
    }
}
