use giftwise_common::Suggestion;
use std::collections::HashSet;

/// Names of gifts already shown in this session, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the name was already recorded.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.names.push(name.to_string());
        true
    }

    /// Records every suggestion name not seen before; returns how many were new.
    pub fn record(&mut self, suggestions: &[Suggestion]) -> usize {
        suggestions
            .iter()
            .filter(|s| self.insert(&s.name))
            .count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn clear(&mut self) {
        self.names.clear();
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SessionHistory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut history = SessionHistory::new();
        for name in iter {
            history.insert(name.as_ref());
        }
        history
    }
}
