use crate::client::SuggestionClient;
use crate::deck::ResultDeck;
use crate::error::RequestError;
use crate::history::SessionHistory;
use crate::session::Session;
use giftwise_common::{FieldParseError, PreferenceField, Preferences};

/// One user's run through the form: answers, shown gifts and the current
/// result cards, wired to a suggestion client.
///
/// Callers must not start a second request while one is pending.
pub struct GiftWizard {
    session: Session,
    client: SuggestionClient,
    deck: ResultDeck,
}

impl GiftWizard {
    pub fn new(client: SuggestionClient, page_size: usize) -> Self {
        Self {
            session: Session::new(),
            client,
            deck: ResultDeck::new(page_size),
        }
    }

    pub fn set_field(&mut self, field: PreferenceField, value: &str) -> Result<(), FieldParseError> {
        self.session.set_field(field, value)
    }

    pub fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), FieldParseError> {
        self.session.set_field_by_name(name, value)
    }

    pub fn preferences(&self) -> &Preferences {
        self.session.preferences()
    }

    pub fn history(&self) -> &SessionHistory {
        self.session.history()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn deck(&self) -> &ResultDeck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut ResultDeck {
        &mut self.deck
    }

    /// Treats `names` as already shown, so the next refinement excludes them.
    pub fn mark_shown<S: AsRef<str>>(&mut self, names: impl IntoIterator<Item = S>) {
        let history = self.session.history_mut();
        for name in names {
            history.insert(name.as_ref());
        }
    }

    /// Fresh top-level request: earlier suggestions no longer count as shown.
    /// History is only replaced once the new request succeeds.
    pub async fn generate(&mut self) -> Result<&ResultDeck, RequestError> {
        let mut fresh = SessionHistory::new();
        let suggestions = self
            .client
            .request_suggestions(self.session.preferences(), &mut fresh, None)
            .await?;
        *self.session.history_mut() = fresh;
        self.deck.replace(suggestions);
        Ok(&self.deck)
    }

    /// Asks for more ideas, excluding everything shown so far this session.
    pub async fn refine(&mut self, feedback: Option<&str>) -> Result<&ResultDeck, RequestError> {
        let (prefs, history) = self.session.parts_mut();
        let suggestions = self.client.request_suggestions(prefs, history, feedback).await?;
        self.deck.replace(suggestions);
        Ok(&self.deck)
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.deck.clear();
    }
}
