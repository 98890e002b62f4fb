//! Preferences edit buffer.
//!
//! The [`PreferencesEditor`] holds a local copy of the user's VIP contacts
//! and domains, seeded from the server on entry to the settings view. All
//! edits are local until `save`, which replaces the server copy wholesale.

use std::sync::Arc;

use crate::api::{ApiError, MailApi};
use crate::domain::{normalize_domain, UserPreferences};

/// Loading the preferences failed.
#[derive(Debug, thiserror::Error)]
#[error("could not load preferences: {0}")]
pub struct PreferencesError(#[source] pub ApiError);

/// Saving the preferences failed; the edit buffer is retained for retry.
#[derive(Debug, thiserror::Error)]
#[error("could not save preferences: {0}")]
pub struct SaveError(#[source] pub ApiError);

/// Editor over the user's VIP contact and domain preferences.
pub struct PreferencesEditor<A> {
    api: Arc<A>,
    buffer: UserPreferences,
    /// Transient saved-confirmation, cleared by the next edit.
    saved: bool,
}

impl<A: MailApi> PreferencesEditor<A> {
    /// Loads the persisted preferences and seeds an edit buffer from them.
    pub async fn load(api: Arc<A>) -> Result<Self, PreferencesError> {
        let buffer = api.get_preferences().await.map_err(PreferencesError)?;
        Ok(Self {
            api,
            buffer,
            saved: false,
        })
    }

    /// Returns the contact list as currently edited.
    pub fn contacts(&self) -> &[String] {
        &self.buffer.vip_contacts
    }

    /// Returns the domain list as currently edited.
    pub fn domains(&self) -> &[String] {
        &self.buffer.vip_domains
    }

    /// Returns true right after a successful save, until the next edit.
    pub fn just_saved(&self) -> bool {
        self.saved
    }

    /// Clears the saved-confirmation, e.g. on navigation.
    pub fn dismiss_saved(&mut self) {
        self.saved = false;
    }

    /// Adds a contact address. Contacts are matched exactly (case kept as
    /// entered); an empty input or an existing entry is a no-op. Returns
    /// whether the buffer changed.
    pub fn add_contact(&mut self, address: &str) -> bool {
        if address.is_empty() {
            return false;
        }
        if self.buffer.vip_contacts.iter().any(|c| c == address) {
            return false;
        }
        self.buffer.vip_contacts.push(address.to_string());
        self.saved = false;
        true
    }

    /// Removes a contact address if present.
    pub fn remove_contact(&mut self, address: &str) -> bool {
        let before = self.buffer.vip_contacts.len();
        self.buffer.vip_contacts.retain(|c| c != address);
        let changed = self.buffer.vip_contacts.len() != before;
        if changed {
            self.saved = false;
        }
        changed
    }

    /// Adds a domain. The input is normalized (single leading `@`
    /// stripped, lower-cased) before the same dedupe rule as contacts.
    pub fn add_domain(&mut self, input: &str) -> bool {
        if input.is_empty() {
            return false;
        }
        let domain = normalize_domain(input);
        if domain.is_empty() || self.buffer.vip_domains.iter().any(|d| *d == domain) {
            return false;
        }
        self.buffer.vip_domains.push(domain);
        self.saved = false;
        true
    }

    /// Removes a domain if present. The input is matched against stored
    /// (normalized) entries.
    pub fn remove_domain(&mut self, domain: &str) -> bool {
        let before = self.buffer.vip_domains.len();
        self.buffer.vip_domains.retain(|d| d != domain);
        let changed = self.buffer.vip_domains.len() != before;
        if changed {
            self.saved = false;
        }
        changed
    }

    /// Persists the whole buffer as the new server copy.
    ///
    /// On failure the buffer is left as edited so nothing is lost; on
    /// success the saved-confirmation is set and the buffer re-seeded from
    /// the server's response.
    pub async fn save(&mut self) -> Result<(), SaveError> {
        let persisted = self
            .api
            .update_preferences(&self.buffer)
            .await
            .map_err(SaveError)?;

        self.buffer = persisted;
        self.saved = true;
        tracing::debug!(
            contacts = self.buffer.vip_contacts.len(),
            domains = self.buffer.vip_domains.len(),
            "preferences saved"
        );
        Ok(())
    }
}
