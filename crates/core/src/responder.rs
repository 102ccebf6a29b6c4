use chrono::NaiveDateTime;

use crate::catalog::IntentCatalog;
use crate::clock::Clock;
use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::models::{IntentId, Reply};
use crate::picker::{pick_from, ReplyPicker};
use crate::session::ConversationSession;

pub const EMPTY_INPUT_REPLY: &str = "Please say something! I'm here to chat!";
pub const FAULT_REPLY: &str = "Oops! Something went wrong. Let's keep chatting!";
pub const INTERRUPT_REPLY: &str = "Goodbye! Thanks for chatting!";
pub const TERMINATED_REPLY: &str = "This conversation has ended. Start a new one to keep chatting.";

const ASSISTANT_PLACEHOLDER: &str = "{assistant}";
const TIME_FORMAT: &str = "It's currently %I:%M %p on %A, %B %d, %Y";

/// Selects the utterance for a classified turn. The session's turn counter
/// must already include this turn; a farewell terminates the session.
pub fn compose_reply(
    catalog: &IntentCatalog,
    config: &ChatConfig,
    session: &mut ConversationSession,
    intent: Option<IntentId>,
    picker: &mut dyn ReplyPicker,
    clock: &dyn Clock,
) -> Result<Reply, ChatError> {
    let Some(intent) = intent else {
        let text = pick_from(picker, &catalog.default_replies)
            .ok_or(ChatError::NoDefaultReplies)?;
        return Ok(Reply {
            text: render_template(text, session),
            intent: None,
            terminal: false,
        });
    };

    if intent == IntentId::TimeQuery {
        return Ok(Reply {
            text: format_time(clock.now()),
            intent: Some(intent),
            terminal: false,
        });
    }

    let replies = catalog
        .category(intent)
        .map(|category| category.replies.as_slice())
        .unwrap_or_default();
    let template = pick_from(picker, replies)
        .ok_or(ChatError::EmptyReplySet(intent))?;
    let mut text = render_template(template, session);

    if intent == IntentId::Farewell {
        session.terminate();
        return Ok(Reply {
            text,
            intent: Some(intent),
            terminal: true,
        });
    }

    if session.turns() > config.personalize_after {
        if let Some(suffix) = pick_from(picker, &catalog.personalization_suffixes) {
            text.push_str(suffix);
        }
    }

    Ok(Reply {
        text,
        intent: Some(intent),
        terminal: false,
    })
}

pub fn name_greeting(name: &str) -> String {
    format!("Nice to meet you, {name}! How can I help you today?")
}

/// Occasionally asks for the user's name while it is still unknown.
pub fn name_prompt(
    catalog: &IntentCatalog,
    config: &ChatConfig,
    session: &ConversationSession,
    picker: &mut dyn ReplyPicker,
) -> Option<String> {
    if session.user_name().is_some() || !picker.chance(config.name_prompt_chance) {
        return None;
    }
    pick_from(picker, &catalog.name_prompts).map(ToString::to_string)
}

pub fn format_time(now: NaiveDateTime) -> String {
    now.format(TIME_FORMAT).to_string()
}

fn render_template(template: &str, session: &ConversationSession) -> String {
    template.replace(ASSISTANT_PLACEHOLDER, session.assistant_name())
}
