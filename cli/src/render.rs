use giftwise_core::{ResultDeck, Suggestion};

pub fn format_card(index: usize, suggestion: &Suggestion) -> String {
    format!(
        "{index}. {}\n   {}\n   Price: {}\n",
        suggestion.name, suggestion.rationale, suggestion.price_range
    )
}

/// Numbered cards starting at `first`.
pub fn format_cards(first: usize, suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "No new gift ideas this time. Try different feedback or start over.\n".to_string();
    }
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format_card(first + i, s))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The visible page of the deck plus a hint when more cards are waiting.
pub fn format_page(deck: &ResultDeck) -> String {
    let mut out = format_cards(deck.position(), deck.current());
    if deck.has_more() {
        out.push_str("\n(more ideas available: type `more`)\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gift(name: &str) -> Suggestion {
        Suggestion {
            name: name.to_string(),
            rationale: format!("{name} fits."),
            price_range: "₹500–800".to_string(),
        }
    }

    #[test]
    fn test_format_card() {
        assert_eq!(
            format_card(2, &gift("Desk Plant")),
            "2. Desk Plant\n   Desk Plant fits.\n   Price: ₹500–800\n"
        );
    }

    #[test]
    fn test_format_page_hints_more() {
        let mut deck = ResultDeck::new(2);
        deck.replace(vec![gift("A"), gift("B"), gift("C")]);
        let page = format_page(&deck);
        assert!(page.starts_with("1. A"));
        assert!(page.contains("2. B"));
        assert!(!page.contains("C fits"));
        assert!(page.contains("type `more`"));

        deck.advance();
        let page = format_page(&deck);
        assert!(page.starts_with("3. C"));
        assert!(!page.contains("type `more`"));
    }

    #[test]
    fn test_empty_results() {
        assert!(format_cards(1, &[]).contains("No new gift ideas"));
    }
}
