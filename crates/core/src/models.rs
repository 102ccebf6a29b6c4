use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentId {
    Greeting,
    StatusQuery,
    IdentityQuery,
    AgeQuery,
    Compliment,
    Help,
    TimeQuery,
    Weather,
    Joke,
    Farewell,
    Thanks,
}

impl IntentId {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::StatusQuery => "status_query",
            Self::IdentityQuery => "identity_query",
            Self::AgeQuery => "age_query",
            Self::Compliment => "compliment",
            Self::Help => "help",
            Self::TimeQuery => "time_query",
            Self::Weather => "weather",
            Self::Joke => "joke",
            Self::Farewell => "farewell",
            Self::Thanks => "thanks",
        }
    }

    /// Categories whose reply is computed at selection time instead of drawn
    /// from a static reply set.
    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::TimeQuery)
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentCategory {
    pub id: IntentId,
    pub triggers: Vec<String>,
    #[serde(default)]
    pub replies: Vec<String>,
}

impl IntentCategory {
    pub fn new(id: IntentId, triggers: &[&str], replies: &[&str]) -> Self {
        Self {
            id,
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            replies: replies.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn first_matching_trigger(&self, normalized: &str) -> Option<&str> {
        self.triggers
            .iter()
            .map(String::as_str)
            .find(|trigger| normalized.contains(trigger))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Active,
    Terminated,
}

/// How a single turn was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "intent")]
pub enum TurnOutcome {
    Empty,
    NameCaptured,
    Matched(IntentId),
    Fallback,
    Fault,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub intent: Option<IntentId>,
    pub terminal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReply {
    pub text: String,
    pub follow_up: Option<String>,
    pub outcome: TurnOutcome,
    pub terminal: bool,
    pub turn: u32,
}

impl TurnReply {
    /// All utterances of the turn, in display order.
    pub fn lines(&self) -> Vec<&str> {
        let mut lines = vec![self.text.as_str()];
        if let Some(follow_up) = &self.follow_up {
            lines.push(follow_up.as_str());
        }
        lines
    }
}
