pub const DEFAULT_ASSISTANT_NAME: &str = "ChatBot";
pub const DEFAULT_PERSONALIZE_AFTER: u32 = 10;
pub const DEFAULT_NAME_PROMPT_CHANCE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    pub assistant_name: String,
    /// Replies get a personalization suffix once the turn counter exceeds this.
    pub personalize_after: u32,
    pub name_prompt_chance: f64,
    /// Characters stripped by the normalizer. `None` strips all ASCII punctuation.
    pub punctuation: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            personalize_after: DEFAULT_PERSONALIZE_AFTER,
            name_prompt_chance: DEFAULT_NAME_PROMPT_CHANCE,
            punctuation: None,
        }
    }
}

impl ChatConfig {
    pub fn with_assistant_name(mut self, name: Option<&str>) -> Self {
        self.assistant_name = resolve_assistant_name(name);
        self
    }

    pub fn is_punctuation(&self, ch: char) -> bool {
        match &self.punctuation {
            Some(set) => set.contains(ch),
            None => ch.is_ascii_punctuation(),
        }
    }
}

pub fn resolve_assistant_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_ASSISTANT_NAME.to_string(),
    }
}
