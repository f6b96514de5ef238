use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_BUDGET: u32 = 100;

/// Answers collected by the wizard form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub occasion: Option<String>,
    pub recipient: Option<String>,
    pub budget: u32,
    pub style: Option<String>,
    pub notes: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            occasion: None,
            recipient: None,
            budget: DEFAULT_BUDGET,
            style: None,
            notes: String::new(),
        }
    }
}

impl Preferences {
    /// Serialize the current answers, e.g. for a debug view or an API call.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    Occasion,
    Recipient,
    Budget,
    Style,
    Notes,
}

impl PreferenceField {
    pub const ALL: [PreferenceField; 5] = [
        PreferenceField::Occasion,
        PreferenceField::Recipient,
        PreferenceField::Budget,
        PreferenceField::Style,
        PreferenceField::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceField::Occasion => "occasion",
            PreferenceField::Recipient => "recipient",
            PreferenceField::Budget => "budget",
            PreferenceField::Style => "style",
            PreferenceField::Notes => "notes",
        }
    }
}

impl fmt::Display for PreferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldParseError {
    #[error("unknown preference field: {0}")]
    UnknownField(String),

    #[error("budget must be a whole number, got {0:?}")]
    Budget(String),
}

impl FromStr for PreferenceField {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "occasion" => Ok(PreferenceField::Occasion),
            "recipient" => Ok(PreferenceField::Recipient),
            "budget" => Ok(PreferenceField::Budget),
            "style" => Ok(PreferenceField::Style),
            "notes" | "additionalinfo" | "additional_info" => Ok(PreferenceField::Notes),
            _ => Err(FieldParseError::UnknownField(s.to_string())),
        }
    }
}

/// One gift idea as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "gift")]
    pub name: String,
    #[serde(rename = "why")]
    pub rationale: String,
    pub price_range: String,
}

/// Body POSTed to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub occasion: String,
    pub recipient: String,
    pub budget: u32,
    pub style: String,
    pub notes: String,
    pub prompt: String,
    pub previous_gifts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub gifts: Vec<Suggestion>,
}
