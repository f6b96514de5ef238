use crate::history::SessionHistory;
use giftwise_common::{FieldParseError, PreferenceField, Preferences};
use uuid::Uuid;

/// Everything one user has entered and been shown since the wizard started.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    preferences: Preferences,
    history: SessionHistory,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let id = Uuid::new_v4().to_string();
        tracing::debug!(session = %id, "session started");
        Self {
            id,
            preferences: Preferences::default(),
            history: SessionHistory::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stores one answer as given. Only `budget` is parsed, everything else is
    /// kept verbatim; completeness is checked when a request is made.
    pub fn set_field(&mut self, field: PreferenceField, value: &str) -> Result<(), FieldParseError> {
        let prefs = &mut self.preferences;
        match field {
            PreferenceField::Occasion => prefs.occasion = Some(value.to_string()),
            PreferenceField::Recipient => prefs.recipient = Some(value.to_string()),
            PreferenceField::Style => prefs.style = Some(value.to_string()),
            PreferenceField::Notes => prefs.notes = value.to_string(),
            PreferenceField::Budget => {
                prefs.budget = value
                    .trim()
                    .parse()
                    .map_err(|_| FieldParseError::Budget(value.to_string()))?;
            }
        }
        tracing::debug!(session = %self.id, %field, "preference updated");
        Ok(())
    }

    pub fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), FieldParseError> {
        self.set_field(name.parse()?, value)
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut SessionHistory {
        &mut self.history
    }

    /// Split borrow for a request: answers are read while history is updated.
    pub fn parts_mut(&mut self) -> (&Preferences, &mut SessionHistory) {
        (&self.preferences, &mut self.history)
    }

    pub fn reset(&mut self) {
        self.preferences = Preferences::default();
        self.history.clear();
        tracing::debug!(session = %self.id, "session reset");
    }
}
