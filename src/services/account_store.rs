//! In-memory store of connected accounts.
//!
//! Holds the one in-memory copy of each connected account and its sync
//! metadata. Server-returned order is preserved; the backend remains the
//! source of truth and the store is replaced wholesale on each refetch.

use chrono::{DateTime, Utc};

use crate::domain::{AccountId, EmailAccount};

/// Fields of an account that can be updated in place.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    /// New last-sync timestamp.
    pub last_sync_at: Option<DateTime<Utc>>,
    /// New email address.
    pub email_address: Option<String>,
}

impl AccountUpdate {
    /// Creates a new empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the last-sync timestamp.
    pub fn last_sync_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_sync_at = Some(at);
        self
    }

    /// Sets the email address.
    pub fn email_address(mut self, address: impl Into<String>) -> Self {
        self.email_address = Some(address.into());
        self
    }
}

/// The set of connected accounts, in server order.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: Vec<EmailAccount>,
}

impl AccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists all accounts in their stored order.
    pub fn list(&self) -> &[EmailAccount] {
        &self.accounts
    }

    /// Gets an account by id.
    pub fn get(&self, id: &AccountId) -> Option<&EmailAccount> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    /// Adds an account. Idempotent on id: an existing entry with the same
    /// id is replaced in place rather than duplicated.
    pub fn add(&mut self, account: EmailAccount) {
        match self.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(existing) => *existing = account,
            None => self.accounts.push(account),
        }
    }

    /// Removes an account by id. A missing id is a no-op: removal races
    /// against concurrent disconnects and must not surface to the caller.
    pub fn remove(&mut self, id: &AccountId) {
        self.accounts.retain(|a| &a.id != id);
    }

    /// Applies an update to the account with the given id, if present.
    pub fn update(&mut self, id: &AccountId, update: AccountUpdate) {
        if let Some(account) = self.accounts.iter_mut().find(|a| &a.id == id) {
            if let Some(at) = update.last_sync_at {
                account.last_sync_at = Some(at);
            }
            if let Some(address) = update.email_address {
                account.email_address = address;
            }
        }
    }

    /// Replaces the whole list with a freshly fetched one.
    pub fn replace_all(&mut self, accounts: Vec<EmailAccount>) {
        self.accounts = accounts;
    }

    /// Returns the number of connected accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true when no accounts are connected.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, email: &str) -> EmailAccount {
        EmailAccount {
            id: AccountId::from(id),
            email_address: email.to_string(),
            last_sync_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn add_and_list_preserves_order() {
        let mut store = AccountStore::new();
        store.add(account("a", "a@gmail.com"));
        store.add(account("b", "b@gmail.com"));
        store.add(account("c", "c@gmail.com"));

        let ids: Vec<_> = store.list().iter().map(|a| a.id.0.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn add_is_idempotent_on_id() {
        let mut store = AccountStore::new();
        store.add(account("a", "a@gmail.com"));
        store.add(account("b", "b@gmail.com"));

        // Re-adding "a" replaces it in place, keeping its position.
        store.add(account("a", "renamed@gmail.com"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].email_address, "renamed@gmail.com");
    }

    #[test]
    fn remove_missing_id_is_a_noop() {
        let mut store = AccountStore::new();
        store.add(account("a", "a@gmail.com"));

        store.remove(&AccountId::from("nonexistent"));
        assert_eq!(store.len(), 1);

        store.remove(&AccountId::from("a"));
        assert!(store.is_empty());

        // Removing again after the entry is gone stays silent.
        store.remove(&AccountId::from("a"));
        assert!(store.is_empty());
    }

    #[test]
    fn update_sets_last_sync() {
        let mut store = AccountStore::new();
        store.add(account("a", "a@gmail.com"));

        let now = Utc::now();
        store.update(&AccountId::from("a"), AccountUpdate::new().last_sync_at(now));

        assert_eq!(store.get(&AccountId::from("a")).unwrap().last_sync_at, Some(now));
    }

    #[test]
    fn update_missing_id_is_a_noop() {
        let mut store = AccountStore::new();
        store.update(
            &AccountId::from("ghost"),
            AccountUpdate::new().email_address("ghost@gmail.com"),
        );
        assert!(store.is_empty());
    }

    #[test]
    fn replace_all_swaps_contents() {
        let mut store = AccountStore::new();
        store.add(account("a", "a@gmail.com"));

        store.replace_all(vec![account("b", "b@gmail.com"), account("c", "c@gmail.com")]);

        let ids: Vec<_> = store.list().iter().map(|a| a.id.0.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
