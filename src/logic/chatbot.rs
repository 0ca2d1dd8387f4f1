use crate::models::{ChatExchange, QuickAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseTopic {
    SeaConditions,
    FishPrices,
    FishingSpots,
    Tuna,
    Salmon,
    Mackerel,
    Regulations,
    Emergency,
    Help,
}

/// One entry of the responder table: any keyword hit selects the response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRule {
    pub topic: ResponseTopic,
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl ResponseRule {
    pub fn matches(&self, lowercased_input: &str) -> bool {
        self.keywords.iter().any(|k| lowercased_input.contains(k))
    }
}

pub const HELP_RESPONSE: &str = "I can help with weather conditions, fish prices, fishing spots, \
regulations, and safety information. What would you like to know about?";

/// Evaluated top to bottom; the first matching rule wins.
pub const RESPONSE_RULES: [ResponseRule; 8] = [
    ResponseRule {
        topic: ResponseTopic::SeaConditions,
        keywords: &["weather", "sea", "wave"],
        response: "The sea is calm today 🌊\nTemperature: 26°C\nWind: Low\nGood day for fishing!",
    },
    ResponseRule {
        topic: ResponseTopic::FishPrices,
        keywords: &["price", "fish price", "market"],
        response: "Today's Fish Prices:\n🐟 Tuna: $15/kg\n🐠 Salmon: $20/kg\n🐟 Mackerel: $10/kg\n🦐 Shrimp: $25/kg",
    },
    ResponseRule {
        topic: ResponseTopic::FishingSpots,
        keywords: &["spot", "location", "fishing spot"],
        response: "Best Fishing Spots Today:\n📍 Negombo Beach - Good for tuna\n📍 Chilaw Harbor - Excellent for mackerel\n📍 Trincomalee Bay - Great for various species",
    },
    ResponseRule {
        topic: ResponseTopic::Tuna,
        keywords: &["tuna"],
        response: "Tuna 🐟\nPrice: $15/kg\nA popular fish, rich in protein and Omega-3.",
    },
    ResponseRule {
        topic: ResponseTopic::Salmon,
        keywords: &["salmon"],
        response: "Salmon 🐠\nPrice: $20/kg\nKnown for its pink flesh and high nutritional value.",
    },
    ResponseRule {
        topic: ResponseTopic::Mackerel,
        keywords: &["mackerel"],
        response: "Mackerel 🐟\nPrice: $10/kg\nAffordable and rich in oil.",
    },
    ResponseRule {
        topic: ResponseTopic::Regulations,
        keywords: &["regulation", "law", "rule"],
        response: "Current Fishing Regulations:\n⚖️ Minimum size for tuna: 40cm\n⚖️ Fishing license required for commercial fishing\n⚖️ Protected species must be released immediately",
    },
    ResponseRule {
        topic: ResponseTopic::Emergency,
        keywords: &["emergency", "help", "safety"],
        response: "Emergency Contacts:\n🆘 Coast Guard: 1-800-COAST-GUARD\n🆘 Marine Rescue: 1-800-MARINE-HELP\n🆘 Weather Emergency: 1-800-WEATHER",
    },
];

#[derive(Debug, Clone)]
pub struct ResponseMatcher {
    rules: &'static [ResponseRule],
}

impl ResponseMatcher {
    pub fn new() -> Self {
        Self {
            rules: &RESPONSE_RULES,
        }
    }

    fn rule_for(&self, lowercased_input: &str) -> Option<&'static ResponseRule> {
        self.rules.iter().find(|rule| rule.matches(lowercased_input))
    }

    /// Topic for already lower-cased input.
    pub fn topic(&self, lowercased_input: &str) -> ResponseTopic {
        self.rule_for(lowercased_input)
            .map(|rule| rule.topic)
            .unwrap_or(ResponseTopic::Help)
    }

    /// Canned response for already lower-cased input.
    pub fn respond(&self, lowercased_input: &str) -> &'static str {
        self.rule_for(lowercased_input)
            .map(|rule| rule.response)
            .unwrap_or(HELP_RESPONSE)
    }
}

impl Default for ResponseMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Conversation log for one chat session. Exchanges are append-only.
#[derive(Debug, Default)]
pub struct ChatSession {
    matcher: ResponseMatcher,
    exchanges: Vec<ChatExchange>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer a question; blank input is ignored.
    pub fn submit(&mut self, input: &str) -> Option<&ChatExchange> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lowered = trimmed.to_lowercase();
        let topic = self.matcher.topic(&lowered);
        let response = self.matcher.respond(&lowered);
        tracing::debug!(question = trimmed, ?topic, "chat question answered");
        self.exchanges.push(ChatExchange::new(trimmed, response));
        self.exchanges.last()
    }

    pub fn quick(&mut self, action: QuickAction) -> Option<&ChatExchange> {
        self.submit(action.question())
    }

    pub fn exchanges(&self) -> &[ChatExchange] {
        &self.exchanges
    }
}
