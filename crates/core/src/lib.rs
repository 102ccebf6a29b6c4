pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod hangman;
pub mod intent;
pub mod models;
pub mod picker;
pub mod portfolio;
pub mod responder;
pub mod session;

pub use catalog::IntentCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ChatConfig;
pub use error::{ChatError, HangmanError, PortfolioError};
pub use intent::{classify_intent, detect_name_declaration, normalize_input};
pub use models::*;
pub use picker::{RandomPicker, ReplyPicker, ScriptedPicker};
pub use responder::{compose_reply, name_greeting, name_prompt};
pub use session::ConversationSession;
