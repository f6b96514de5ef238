use giftwise_common::Suggestion;

pub const DEFAULT_PAGE_SIZE: usize = 3;

/// The last batch of suggestions, shown a few cards at a time.
#[derive(Debug, Clone)]
pub struct ResultDeck {
    suggestions: Vec<Suggestion>,
    page_size: usize,
    cursor: usize,
}

impl Default for ResultDeck {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ResultDeck {
    /// A zero page size is treated as one card per page.
    pub fn new(page_size: usize) -> Self {
        Self {
            suggestions: Vec::new(),
            page_size: page_size.max(1),
            cursor: 0,
        }
    }

    pub fn replace(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.cursor = 0;
    }

    pub fn current(&self) -> &[Suggestion] {
        let end = (self.cursor + self.page_size).min(self.suggestions.len());
        &self.suggestions[self.cursor.min(end)..end]
    }

    pub fn has_more(&self) -> bool {
        self.cursor + self.page_size < self.suggestions.len()
    }

    /// Moves to the next page. Returns `false`, staying put, when none is left.
    pub fn advance(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.cursor += self.page_size;
        true
    }

    /// 1-based index of the first visible card.
    pub fn position(&self) -> usize {
        self.cursor + 1
    }

    pub fn all(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_of(n: usize, page_size: usize) -> ResultDeck {
        let mut deck = ResultDeck::new(page_size);
        deck.replace(
            (1..=n)
                .map(|i| Suggestion {
                    name: format!("Gift {i}"),
                    rationale: String::new(),
                    price_range: String::new(),
                })
                .collect(),
        );
        deck
    }

    fn names(deck: &ResultDeck) -> Vec<&str> {
        deck.current().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_pages_through_five_cards() {
        let mut deck = deck_of(5, 3);
        assert_eq!(names(&deck), vec!["Gift 1", "Gift 2", "Gift 3"]);
        assert!(deck.has_more());

        assert!(deck.advance());
        assert_eq!(names(&deck), vec!["Gift 4", "Gift 5"]);
        assert_eq!(deck.position(), 4);
        assert!(!deck.has_more());

        assert!(!deck.advance());
        assert_eq!(names(&deck), vec!["Gift 4", "Gift 5"]);
    }

    #[test]
    fn test_replace_rewinds() {
        let mut deck = deck_of(6, 3);
        deck.advance();
        deck.replace(deck_of(2, 3).all().to_vec());
        assert_eq!(deck.position(), 1);
        assert_eq!(names(&deck), vec!["Gift 1", "Gift 2"]);
    }

    #[test]
    fn test_empty_deck() {
        let mut deck = ResultDeck::default();
        assert!(deck.current().is_empty());
        assert!(!deck.advance());
        assert!(deck.is_empty());
    }

    #[test]
    fn test_zero_page_size() {
        let deck = deck_of(2, 0);
        assert_eq!(names(&deck), vec!["Gift 1"]);
    }
}
