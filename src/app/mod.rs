//! Application state and lifecycle.
//!
//! The inbox view model composes the account store, the ranked message
//! list, and the selection state into what the presentation layer renders.
//! `init_tracing` belongs to the app-start lifecycle: the embedding shell
//! calls it once before constructing any component.

mod inbox;
mod state;

pub use inbox::InboxViewModel;
pub use state::{DisplayState, InboxEntry, LoadState, ViewMode};

/// Initializes the tracing subscriber for the process.
///
/// Honors `RUST_LOG`, defaulting to info.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}
