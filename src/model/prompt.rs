use crate::conversation::{Role, Turn};

/// The full text context sent to the model for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest(String);

impl PromptRequest {
    /// Every earlier turn, then the new user text, then an empty assistant cue.
    pub fn build(history: &[Turn], user_text: &str) -> Self {
        let mut lines: Vec<String> = history
            .iter()
            .map(|turn| format!("{}: {}", turn.role().label(), turn.text()))
            .collect();
        lines.push(format!("{}: {}", Role::User.label(), user_text));
        lines.push(format!("{}:", Role::Assistant.label()));
        Self(lines.join("\n"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
