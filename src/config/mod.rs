//! Configuration and settings management.
//!
//! This module provides client settings types and persistence. Settings are
//! stored in the user's config directory as JSON and loaded at startup.

mod settings;

pub use settings::{ApiSettings, InboxSettings, Settings};
