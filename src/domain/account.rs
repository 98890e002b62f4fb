//! Connected-account domain types.
//!
//! A connected account is created server-side when the OAuth connect flow
//! completes and destroyed on disconnect; the client only observes it via
//! the account list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AccountId;

/// An email account connected to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAccount {
    /// Unique identifier assigned by the backend.
    pub id: AccountId,
    /// Address of the connected mailbox.
    pub email_address: String,
    /// When this account last completed a sync, if ever.
    pub last_sync_at: Option<DateTime<Utc>>,
    /// When the account was connected.
    pub created_at: DateTime<Utc>,
}

impl EmailAccount {
    /// Returns true if this account has completed at least one sync.
    pub fn has_synced(&self) -> bool {
        self.last_sync_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(last_sync_at: Option<DateTime<Utc>>) -> EmailAccount {
        EmailAccount {
            id: AccountId::from("account-1"),
            email_address: "user@gmail.com".to_string(),
            last_sync_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn account_serialization() {
        let account = account(Some(Utc::now()));

        let json = serde_json::to_string(&account).unwrap();
        let deserialized: EmailAccount = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.id, AccountId::from("account-1"));
        assert_eq!(deserialized.email_address, "user@gmail.com");
        assert!(deserialized.last_sync_at.is_some());
    }

    #[test]
    fn never_synced_account_deserializes_with_null_timestamp() {
        let json = r#"{
            "id": "account-2",
            "email_address": "other@gmail.com",
            "last_sync_at": null,
            "created_at": "2024-01-15T10:00:00Z"
        }"#;

        let account: EmailAccount = serde_json::from_str(json).unwrap();
        assert!(!account.has_synced());
    }

    #[test]
    fn has_synced() {
        assert!(account(Some(Utc::now())).has_synced());
        assert!(!account(None).has_synced());
    }
}
