//! Conversions between persisted records and DTOs.

use crate::dto::User;
use roster_repository::UserRecord;

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
        }
    }
}

impl From<&User> for UserRecord {
    /// Builds an unsaved record; any id on the DTO is ignored.
    fn from(user: &User) -> Self {
        Self::new(user.name.clone(), user.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::UserId;

    #[test]
    fn test_record_to_dto() {
        let record = UserRecord {
            id: Some(UserId(3)),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        let user = User::from(record);
        assert_eq!(user.id, Some(UserId(3)));
        assert_eq!(user.name, "Alice");
    }

    #[test]
    fn test_dto_to_record_drops_id() {
        let user = User::new("Alice", "alice@example.com").with_id(UserId(9));
        let record = UserRecord::from(&user);
        assert!(record.id.is_none());
        assert_eq!(record.email, "alice@example.com");
    }
}
