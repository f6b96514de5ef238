//! Shared types for the gift suggestion workspace.

mod types;

pub use types::{
    FieldParseError, PreferenceField, Preferences, Suggestion, SuggestionRequest,
    SuggestionResponse, DEFAULT_BUDGET,
};
