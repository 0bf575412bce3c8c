//! User DTO.

use roster_core::validation::rules::{not_blank, valid_email};
use roster_core::UserId;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Wire and cache representation of a user.
///
/// `id` is absent until the record has been persisted. A missing or `null`
/// `name` or `email` deserializes as an empty string so it fails validation
/// instead of JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i64>, example = 1)]
    pub id: Option<UserId>,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank", message = "User name and email cannot be null"))]
    #[schema(example = "Alice")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank", message = "User name and email cannot be null"),
        custom(function = "valid_email", message = "Invalid email address")
    )]
    #[schema(example = "alice@example.com")]
    pub email: String,
}

impl User {
    /// Creates an unsaved user.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns a copy carrying the given id.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
