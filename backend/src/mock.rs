use giftwise_common::{Suggestion, SuggestionRequest, SuggestionResponse};
use serde_json::Value;
use std::time::Duration;

/// Pause applied before the mock answers, long enough to show a loading state.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1200);

const CATALOGUE: [(&str, &str, &str); 5] = [
    (
        "Specialty Coffee Sampler",
        "A curated set of coffee blends that feels thoughtful without adding clutter.",
        "₹800–1200",
    ),
    (
        "Minimal Desk Organizer",
        "Keeps their workspace tidy while matching a clean, aesthetic vibe.",
        "₹600–1000",
    ),
    (
        "Personalized Bookmark",
        "A subtle personal touch that feels intentional and useful for everyday reading.",
        "₹300–500",
    ),
    (
        "Scented Soy Candle",
        "Adds warmth to their space without being overpowering or generic.",
        "₹700–900",
    ),
    (
        "Compact Travel Mug",
        "Practical for daily routines and great for someone always on the move.",
        "₹900–1300",
    ),
];

/// Offline stand-in for the generation service.
///
/// Answers from a fixed catalogue and honours `previous_gifts` the way a
/// well-behaved model would, so repeated refinements eventually run dry.
#[derive(Debug, Clone)]
pub struct MockBackend {
    delay: Duration,
}

impl MockBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn post(&self, request: &SuggestionRequest) -> Value {
        tracing::debug!(
            occasion = %request.occasion,
            excluded = request.previous_gifts.len(),
            "mock backend generating gifts"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let gifts = CATALOGUE
            .iter()
            .filter(|(name, _, _)| !request.previous_gifts.iter().any(|p| p == name))
            .map(|(name, why, price)| Suggestion {
                name: name.to_string(),
                rationale: why.to_string(),
                price_range: price.to_string(),
            })
            .collect();

        serde_json::to_value(SuggestionResponse { gifts }).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(previous: &[&str]) -> SuggestionRequest {
        SuggestionRequest {
            occasion: "Birthday".to_string(),
            recipient: "Friend".to_string(),
            budget: 1000,
            style: "Practical".to_string(),
            notes: String::new(),
            prompt: "prompt".to_string(),
            previous_gifts: previous.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_mock_returns_full_catalogue() {
        let backend = MockBackend::new(Duration::ZERO);
        let value = backend.post(&request(&[])).await;
        let response: SuggestionResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.gifts.len(), 5);
        assert_eq!(response.gifts[0].name, "Specialty Coffee Sampler");
    }

    #[tokio::test]
    async fn test_mock_skips_previous_gifts() {
        let backend = MockBackend::new(Duration::ZERO);
        let value = backend
            .post(&request(&["Scented Soy Candle", "Specialty Coffee Sampler"]))
            .await;
        let response: SuggestionResponse = serde_json::from_value(value).unwrap();
        let names: Vec<_> = response.gifts.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Minimal Desk Organizer", "Personalized Bookmark", "Compact Travel Mug"]
        );
    }
}
