use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::intent::normalize_input;
use crate::models::{IntentCategory, IntentId};

pub const TERMINATION_WORDS: &[&str] = &["quit", "exit", "bye", "goodbye"];

/// Read-only intent table. Category order is the classification order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentCatalog {
    pub categories: Vec<IntentCategory>,
    pub default_replies: Vec<String>,
    #[serde(default = "default_suffixes")]
    pub personalization_suffixes: Vec<String>,
    #[serde(default = "default_name_prompts")]
    pub name_prompts: Vec<String>,
    #[serde(default = "default_termination_words")]
    pub termination_words: Vec<String>,
}

impl IntentCatalog {
    pub fn from_json(raw: &str) -> Result<Self, ChatError> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), ChatError> {
        if self.categories.is_empty() {
            return Err(ChatError::InvalidCatalog("no categories".to_string()));
        }

        if self.default_replies.is_empty() {
            return Err(ChatError::NoDefaultReplies);
        }

        if !self.categories.iter().any(|c| c.id == IntentId::Farewell) {
            return Err(ChatError::InvalidCatalog(
                "a farewell category is required".to_string(),
            ));
        }

        for (index, category) in self.categories.iter().enumerate() {
            if self.categories[..index].iter().any(|c| c.id == category.id) {
                return Err(ChatError::InvalidCatalog(format!(
                    "duplicate category `{}`",
                    category.id
                )));
            }

            if category.triggers.is_empty() {
                return Err(ChatError::InvalidCatalog(format!(
                    "category `{}` has no triggers",
                    category.id
                )));
            }

            if let Some(bad) = category.triggers.iter().find(|t| !is_normalized(t)) {
                return Err(ChatError::InvalidCatalog(format!(
                    "category `{}` has trigger `{bad}` that normalized input can never contain",
                    category.id
                )));
            }

            if !category.id.is_dynamic() && category.replies.is_empty() {
                return Err(ChatError::EmptyReplySet(category.id));
            }
        }

        if let Some(bad) = self.termination_words.iter().find(|w| !is_normalized(w)) {
            return Err(ChatError::InvalidCatalog(format!(
                "termination word `{bad}` is not in normalized form"
            )));
        }

        Ok(())
    }

    pub fn category(&self, id: IntentId) -> Option<&IntentCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn is_termination_word(&self, normalized: &str) -> bool {
        self.termination_words.iter().any(|w| w == normalized)
    }
}

impl Default for IntentCatalog {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            default_replies: strings(&[
                "That's interesting! Can you tell me more?",
                "I'm not sure I understand. Could you rephrase that?",
                "Hmm, that's a new one for me! Can you explain?",
                "I'd love to learn more about what you mean!",
                "That sounds intriguing! Tell me more!",
                "I'm still learning. Can you help me understand?",
                "Interesting perspective! What makes you say that?",
                "I'm curious to know more about your thoughts on that!",
            ]),
            personalization_suffixes: default_suffixes(),
            name_prompts: default_name_prompts(),
            termination_words: default_termination_words(),
        }
    }
}

fn default_categories() -> Vec<IntentCategory> {
    vec![
        IntentCategory::new(
            IntentId::Greeting,
            &[
                "hello",
                "hi",
                "hey",
                "good morning",
                "good afternoon",
                "good evening",
                "howdy",
                "greetings",
            ],
            &[
                "Hello there! How can I help you today?",
                "Hi! Great to see you!",
                "Hey! What's on your mind?",
                "Hello! Hope you're having a wonderful day!",
                "Hi there! Ready to chat?",
            ],
        ),
        IntentCategory::new(
            IntentId::StatusQuery,
            &[
                "how are you",
                "how do you feel",
                "how are things",
                "whats up",
                "how have you been",
            ],
            &[
                "I'm doing great, thanks for asking! How about you?",
                "I'm fantastic! Ready to help and chat!",
                "Feeling good today! What about yourself?",
                "I'm in a great mood! How are you doing?",
                "Excellent! Thanks for asking. How's your day going?",
            ],
        ),
        IntentCategory::new(
            IntentId::IdentityQuery,
            &[
                "what is your name",
                "whats your name",
                "who are you",
                "your name",
            ],
            &[
                "I'm {assistant}, your friendly chatbot assistant!",
                "My name is {assistant}. Nice to meet you!",
                "I go by {assistant}. What should I call you?",
                "You can call me {assistant}! What's your name?",
            ],
        ),
        IntentCategory::new(
            IntentId::AgeQuery,
            &[
                "how old are you",
                "what is your age",
                "whats your age",
                "your age",
            ],
            &[
                "I'm as old as my code - timeless and always learning!",
                "Age is just a number for a chatbot like me!",
                "I was born when my program started, so pretty young!",
                "I don't age like humans do - I just get smarter!",
            ],
        ),
        IntentCategory::new(
            IntentId::Compliment,
            &[
                "you are great",
                "you are awesome",
                "you are cool",
                "you are nice",
                "good job",
                "well done",
                "amazing",
                "fantastic",
            ],
            &[
                "Aww, thank you so much! You're pretty awesome too!",
                "That's so kind of you to say! You made my day!",
                "Thanks! I really appreciate the compliment!",
                "You're too nice! Thank you!",
                "That means a lot to me! You're wonderful too!",
            ],
        ),
        IntentCategory::new(
            IntentId::Help,
            &[
                "help",
                "can you help",
                "i need help",
                "assist me",
                "support",
            ],
            &[
                "Of course! I'm here to help. What do you need assistance with?",
                "I'd be happy to help! What can I do for you?",
                "Sure thing! How can I assist you today?",
                "Help is on the way! What's the problem?",
                "I'm here to help! What's troubling you?",
            ],
        ),
        IntentCategory::new(
            IntentId::TimeQuery,
            &[
                "what time",
                "current time",
                "time now",
                "what is the time",
            ],
            &[],
        ),
        IntentCategory::new(
            IntentId::Weather,
            &[
                "weather",
                "how is the weather",
                "is it raining",
                "sunny",
                "cloudy",
            ],
            &[
                "I wish I could check the weather for you, but I don't have access to weather data!",
                "I can't see outside, but I hope it's beautiful weather wherever you are!",
                "Weather updates aren't my specialty, but I hope you're enjoying nice weather!",
                "I'd love to tell you about the weather, but that's beyond my capabilities right now!",
            ],
        ),
        IntentCategory::new(
            IntentId::Joke,
            &[
                "tell me a joke",
                "joke",
                "make me laugh",
                "funny",
                "humor",
            ],
            &[
                "Why don't programmers like nature? It has too many bugs!",
                "I told my computer a joke about UDP... but I'm not sure it got it!",
                "Why do Rust programmers never get lost? They always follow the borrow checker!",
                "How many programmers does it take to change a light bulb? None, that's a hardware problem!",
                "Why did the chatbot go to therapy? It had too many issues to resolve!",
            ],
        ),
        IntentCategory::new(
            IntentId::Farewell,
            &[
                "bye",
                "goodbye",
                "see you later",
                "farewell",
                "exit",
                "quit",
                "leave",
                "see ya",
            ],
            &[
                "Goodbye! It was great chatting with you!",
                "See you later! Have a wonderful day!",
                "Farewell! Come back anytime!",
                "Bye! Thanks for the lovely conversation!",
                "Take care! Hope to chat again soon!",
            ],
        ),
        IntentCategory::new(
            IntentId::Thanks,
            &["thank you", "thanks", "appreciate it", "grateful"],
            &[
                "You're very welcome! Happy to help!",
                "No problem at all! Glad I could assist!",
                "You're welcome! That's what I'm here for!",
                "My pleasure! Always happy to help!",
                "Don't mention it! Anytime!",
            ],
        ),
    ]
}

fn default_suffixes() -> Vec<String> {
    strings(&[
        " We've been chatting for a while now!",
        " I'm enjoying our conversation!",
        " You're a great conversationalist!",
        "",
    ])
}

fn default_name_prompts() -> Vec<String> {
    strings(&[
        "By the way, what should I call you?",
        "I'd love to know your name!",
        "What's your name, if you don't mind me asking?",
    ])
}

fn default_termination_words() -> Vec<String> {
    strings(TERMINATION_WORDS)
}

/// Matching happens against normalized input, so catalog phrases must already
/// be lowercase, punctuation-free and trimmed.
fn is_normalized(phrase: &str) -> bool {
    !phrase.is_empty() && normalize_input(phrase, &ChatConfig::default()) == phrase
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
