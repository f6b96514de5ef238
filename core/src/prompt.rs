//! Prompt rendering for the generation backend.
//!
//! The template carries `{{name}}` placeholders for a fixed set of fields.
//! Anything beyond the template (previously shown gifts) is appended as its
//! own section rather than spliced into a placeholder.

use crate::history::SessionHistory;
use giftwise_common::Preferences;

pub const PROMPT_TEMPLATE: &str = "You are a thoughtful gifting expert who suggests practical, creative, and meaningful gifts.

Task:
Suggest 5 gift ideas based on the details below. The gifts should feel intentional, not generic.

Details:
Occasion: {{occasion}}
Recipient: {{recipient}}
Budget: ₹{{budget}}
Preferred gift style: {{style}}
Additional notes: {{notes}}

Rules:
- Stay within the given budget.
- Avoid cliché or overused gifts unless they are clearly justified.
- Prioritize usefulness, emotional value, or personalization.
- If details are vague, make reasonable assumptions and state them subtly.

Output format (strict JSON):
{
  \"gifts\": [
    {
      \"gift\": \"Gift name\",
      \"why\": \"1–2 sentence explanation of why this gift fits the person and occasion\",
      \"price_range\": \"Approximate price\"
    }
  ]
}";

pub const DEFAULT_OCCASION: &str = "any occasion";
pub const DEFAULT_RECIPIENT: &str = "someone special";
pub const DEFAULT_STYLE: &str = "thoughtful";
pub const DEFAULT_NOTES: &str = "No additional preferences";

/// Separates the user's own notes from refinement feedback.
pub const FEEDBACK_MARKER: &str = "Refinement feedback:";

pub const EXCLUSION_HEADER: &str =
    "Already suggested in this session. Do NOT suggest any of these again:";

/// Values substituted into [`PROMPT_TEMPLATE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFields {
    pub occasion: String,
    pub recipient: String,
    pub budget: u32,
    pub style: String,
    pub notes: String,
}

impl PromptFields {
    /// Fills blanks with neutral defaults and folds `feedback` into the notes.
    pub fn from_preferences(prefs: &Preferences, feedback: Option<&str>) -> Self {
        fn or_default(value: Option<&str>, default: &str) -> String {
            match value.map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => default.to_string(),
            }
        }

        Self {
            occasion: or_default(prefs.occasion.as_deref(), DEFAULT_OCCASION),
            recipient: or_default(prefs.recipient.as_deref(), DEFAULT_RECIPIENT),
            budget: prefs.budget,
            style: or_default(prefs.style.as_deref(), DEFAULT_STYLE),
            notes: or_default(Some(merge_feedback(&prefs.notes, feedback).as_str()), DEFAULT_NOTES),
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "occasion" => Some(self.occasion.clone()),
            "recipient" => Some(self.recipient.clone()),
            "budget" => Some(self.budget.to_string()),
            "style" => Some(self.style.clone()),
            "notes" => Some(self.notes.clone()),
            _ => None,
        }
    }
}

/// Appends refinement feedback to the notes for a single request.
pub fn merge_feedback(notes: &str, feedback: Option<&str>) -> String {
    let notes = notes.trim();
    match feedback.map(str::trim).filter(|f| !f.is_empty()) {
        None => notes.to_string(),
        Some(feedback) if notes.is_empty() => format!("{FEEDBACK_MARKER} {feedback}"),
        Some(feedback) => format!("{notes}\n{FEEDBACK_MARKER} {feedback}"),
    }
}

/// Replaces each `{{key}}` in `template` with its field value.
///
/// Unknown keys and unterminated braces are copied through untouched.
pub fn substitute(template: &str, fields: &PromptFields) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match fields.lookup(key.trim()) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn exclusion_clause(history: &SessionHistory) -> Option<String> {
    if history.is_empty() {
        return None;
    }
    let mut clause = String::from(EXCLUSION_HEADER);
    for name in history.names() {
        clause.push_str("\n- ");
        clause.push_str(name);
    }
    Some(clause)
}

pub fn build_prompt(prefs: &Preferences, history: &SessionHistory, feedback: Option<&str>) -> String {
    let fields = PromptFields::from_preferences(prefs, feedback);
    let mut prompt = substitute(PROMPT_TEMPLATE, &fields);
    if let Some(clause) = exclusion_clause(history) {
        prompt.push_str("\n\n");
        prompt.push_str(&clause);
    }
    prompt
}
