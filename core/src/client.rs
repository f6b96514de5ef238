use crate::error::RequestError;
use crate::history::SessionHistory;
use crate::prompt::{build_prompt, merge_feedback};
use async_trait::async_trait;
use giftwise_backend::{HttpBackend, MockBackend};
use giftwise_common::{PreferenceField, Preferences, Suggestion, SuggestionRequest, SuggestionResponse};
use serde_json::Value;

/// A service that turns a request into a raw JSON reply.
#[async_trait]
pub trait SuggestionBackend: Send + Sync {
    async fn generate(&self, request: &SuggestionRequest) -> Result<Value, RequestError>;
}

#[async_trait]
impl SuggestionBackend for HttpBackend {
    async fn generate(&self, request: &SuggestionRequest) -> Result<Value, RequestError> {
        Ok(self.post(request).await?)
    }
}

#[async_trait]
impl SuggestionBackend for MockBackend {
    async fn generate(&self, request: &SuggestionRequest) -> Result<Value, RequestError> {
        Ok(self.post(request).await)
    }
}

/// The three answers a request cannot go out without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFields<'a> {
    pub occasion: &'a str,
    pub recipient: &'a str,
    pub style: &'a str,
}

/// Checks that occasion, recipient and style are filled in, reporting every
/// missing one at once.
pub fn validate(prefs: &Preferences) -> Result<RequiredFields<'_>, RequestError> {
    fn filled(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    let occasion = filled(&prefs.occasion);
    let recipient = filled(&prefs.recipient);
    let style = filled(&prefs.style);

    match (occasion, recipient, style) {
        (Some(occasion), Some(recipient), Some(style)) => Ok(RequiredFields {
            occasion,
            recipient,
            style,
        }),
        _ => {
            let missing = [
                (PreferenceField::Occasion, occasion),
                (PreferenceField::Recipient, recipient),
                (PreferenceField::Style, style),
            ]
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(field, _)| field)
            .collect();
            Err(RequestError::Validation { missing })
        }
    }
}

/// Extracts the suggestion list from a backend reply.
pub fn parse_suggestions(value: Value) -> Result<Vec<Suggestion>, RequestError> {
    match value.get("gifts") {
        None => return Err(RequestError::malformed("response has no `gifts` field")),
        Some(gifts) if !gifts.is_array() => {
            return Err(RequestError::malformed("`gifts` is not a list"))
        }
        Some(_) => {}
    }
    let response: SuggestionResponse = serde_json::from_value(value)
        .map_err(|e| RequestError::malformed(format!("invalid gift entry: {e}")))?;
    Ok(response.gifts)
}

/// Sends one suggestion request per call and keeps the shown-gift history
/// current.
pub struct SuggestionClient {
    backend: Box<dyn SuggestionBackend>,
}

impl SuggestionClient {
    pub fn new(backend: Box<dyn SuggestionBackend>) -> Self {
        Self { backend }
    }

    /// Validates, renders the prompt, makes a single backend call and, on
    /// success only, records the returned names in `history`.
    pub async fn request_suggestions(
        &self,
        prefs: &Preferences,
        history: &mut SessionHistory,
        feedback: Option<&str>,
    ) -> Result<Vec<Suggestion>, RequestError> {
        let required = match validate(prefs) {
            Ok(required) => required,
            Err(err) => {
                tracing::info!(%err, "suggestion request rejected");
                return Err(err);
            }
        };

        let request = SuggestionRequest {
            occasion: required.occasion.to_string(),
            recipient: required.recipient.to_string(),
            budget: prefs.budget,
            style: required.style.to_string(),
            notes: merge_feedback(&prefs.notes, feedback),
            prompt: build_prompt(prefs, history, feedback),
            previous_gifts: history.names().to_vec(),
        };
        tracing::info!(
            occasion = %request.occasion,
            excluded = request.previous_gifts.len(),
            refinement = feedback.is_some(),
            "requesting gift suggestions"
        );

        let reply = self.backend.generate(&request).await.map_err(|err| {
            tracing::warn!(%err, "suggestion request failed");
            err
        })?;
        let suggestions = parse_suggestions(reply).map_err(|err| {
            tracing::warn!(%err, "suggestion response rejected");
            err
        })?;

        let added = history.record(&suggestions);
        tracing::info!(
            returned = suggestions.len(),
            added,
            history = history.len(),
            "gift suggestions received"
        );
        Ok(suggestions)
    }
}
