use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One user question and the assistant's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatExchange {
    user_text: String,
    response_text: String,
    asked_at: DateTime<Local>,
}

impl ChatExchange {
    pub fn new(user_text: impl Into<String>, response_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            response_text: response_text.into(),
            asked_at: Local::now(),
        }
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn response_text(&self) -> &str {
        &self.response_text
    }

    pub fn asked_at(&self) -> DateTime<Local> {
        self.asked_at
    }
}

impl std::fmt::Display for ChatExchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You: {}\nAssistant: {}",
            self.user_text, self.response_text
        )
    }
}

/// Preset questions offered as one-key shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Weather,
    FishPrices,
    FishingSpots,
}

impl QuickAction {
    pub fn question(&self) -> &'static str {
        match self {
            QuickAction::Weather => "What's the weather like for fishing today?",
            QuickAction::FishPrices => "What are the current fish prices?",
            QuickAction::FishingSpots => "What are the best fishing spots today?",
        }
    }
}
