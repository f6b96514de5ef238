//! Core library: session state, prompt rendering and the suggestion round trip.

pub mod client;
pub mod config;
pub mod deck;
pub mod error;
pub mod history;
pub mod prompt;
pub mod session;
pub mod wizard;

pub use client::{SuggestionBackend, SuggestionClient};
pub use config::{BackendKind, Config, ConfigError, ConfigSource};
pub use deck::ResultDeck;
pub use error::{ErrorReporter, RequestError};
pub use history::SessionHistory;
pub use session::Session;
pub use wizard::GiftWizard;

pub use giftwise_common::{FieldParseError, PreferenceField, Preferences, Suggestion};
