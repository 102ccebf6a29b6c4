use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use parlor_core::responder::{EMPTY_INPUT_REPLY, FAULT_REPLY, INTERRUPT_REPLY, TERMINATED_REPLY};
use parlor_core::{
    classify_intent, compose_reply, detect_name_declaration, name_greeting, name_prompt,
    normalize_input, ChatConfig, ChatError, Clock, ConversationSession, IntentCatalog,
    ReplyPicker, SystemClock, TurnOutcome, TurnReply,
};
use parlor_observability::ChatMetrics;
use tracing::{debug, info, instrument, warn};

const HELP_COMMANDS: &[&str] = &["help", "assist", "commands"];

pub struct ChatAgent {
    catalog: Arc<IntentCatalog>,
    config: ChatConfig,
    picker: Box<dyn ReplyPicker + Send>,
    clock: Box<dyn Clock + Send>,
    metrics: Arc<ChatMetrics>,
}

impl ChatAgent {
    pub fn new(
        catalog: Arc<IntentCatalog>,
        config: ChatConfig,
        picker: Box<dyn ReplyPicker + Send>,
        metrics: Arc<ChatMetrics>,
    ) -> Self {
        Self {
            catalog,
            config,
            picker,
            clock: Box::new(SystemClock),
            metrics,
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock + Send>) -> Self {
        self.clock = clock;
        self
    }

    pub fn metrics(&self) -> &Arc<ChatMetrics> {
        &self.metrics
    }

    pub fn start_session(&self) -> ConversationSession {
        let session = ConversationSession::new(&self.config.assistant_name);
        info!(
            session_id = %session.session_id(),
            assistant = %session.assistant_name(),
            "chat session started"
        );
        session
    }

    /// Exact `help`-style commands that the console answers with its help
    /// panel instead of a turn.
    pub fn is_help_command(&self, raw: &str) -> bool {
        let normalized = normalize_input(raw, &self.config);
        HELP_COMMANDS.contains(&normalized.as_str())
    }

    /// Runs one input through the name gate, classifier and responder. Always
    /// yields a reply; internal faults become an apology and leave the session
    /// active.
    #[instrument(skip(self, session, raw), fields(session_id = %session.session_id()))]
    pub fn handle_turn(&mut self, session: &mut ConversationSession, raw: &str) -> TurnReply {
        if session.ensure_active().is_err() {
            return TurnReply {
                text: TERMINATED_REPLY.to_string(),
                follow_up: None,
                outcome: TurnOutcome::Rejected,
                terminal: true,
                turn: session.turns(),
            };
        }

        if raw.trim().is_empty() {
            self.metrics.inc_empty_input();
            return TurnReply {
                text: EMPTY_INPUT_REPLY.to_string(),
                follow_up: None,
                outcome: TurnOutcome::Empty,
                terminal: false,
                turn: session.turns(),
            };
        }

        let turn = session.begin_turn();
        self.metrics.inc_turn();

        let attempt = panic::catch_unwind(AssertUnwindSafe(|| self.respond(session, raw)));
        let mut reply = match attempt {
            Ok(Ok(reply)) => reply,
            Ok(Err(error)) => self.fault_reply(turn, &error.to_string()),
            Err(_) => self.fault_reply(turn, "panic while composing reply"),
        };

        if !reply.terminal {
            reply.follow_up =
                name_prompt(&self.catalog, &self.config, session, self.picker.as_mut());
        }

        match reply.outcome {
            TurnOutcome::Matched(_) => self.metrics.inc_matched(),
            TurnOutcome::Fallback => self.metrics.inc_fallback(),
            TurnOutcome::NameCaptured => self.metrics.inc_name_captured(),
            _ => {}
        }

        info!(
            turn,
            outcome = ?reply.outcome,
            terminal = reply.terminal,
            "turn handled"
        );

        reply
    }

    /// Ends the session after an external interrupt.
    pub fn interrupt(&self, session: &mut ConversationSession) -> String {
        session.terminate();
        info!(session_id = %session.session_id(), turns = session.turns(), "chat interrupted");
        INTERRUPT_REPLY.to_string()
    }

    fn respond(
        &mut self,
        session: &mut ConversationSession,
        raw: &str,
    ) -> Result<TurnReply, ChatError> {
        let turn = session.turns();

        if session.user_name().is_none() {
            if let Some(name) = detect_name_declaration(&self.catalog, raw) {
                session.capture_user_name(name.clone());
                debug!(user_name = %name, "captured user name");
                return Ok(TurnReply {
                    text: name_greeting(&name),
                    follow_up: None,
                    outcome: TurnOutcome::NameCaptured,
                    terminal: false,
                    turn,
                });
            }
        }

        let normalized = normalize_input(raw, &self.config);
        let intent = classify_intent(&self.catalog, &normalized);
        debug!(normalized = %normalized, intent = ?intent, "classified input");

        let reply = compose_reply(
            &self.catalog,
            &self.config,
            session,
            intent,
            self.picker.as_mut(),
            self.clock.as_ref(),
        )?;

        Ok(TurnReply {
            text: reply.text,
            follow_up: None,
            outcome: reply
                .intent
                .map_or(TurnOutcome::Fallback, TurnOutcome::Matched),
            terminal: reply.terminal,
            turn,
        })
    }

    fn fault_reply(&self, turn: u32, reason: &str) -> TurnReply {
        self.metrics.inc_fault();
        warn!(turn, reason = %reason, "reply generation failed");
        TurnReply {
            text: FAULT_REPLY.to_string(),
            follow_up: None,
            outcome: TurnOutcome::Fault,
            terminal: false,
            turn,
        }
    }
}

/// Built-in catalog, or a JSON catalog read from `path`.
pub fn load_catalog(path: Option<&Path>) -> Result<IntentCatalog> {
    let Some(path) = path else {
        return Ok(IntentCatalog::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading catalog from {}", path.display()))?;
    let catalog = IntentCatalog::from_json(&raw)
        .with_context(|| format!("invalid catalog in {}", path.display()))?;
    info!(path = %path.display(), categories = catalog.categories.len(), "catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use parlor_core::{FixedClock, IntentId, ScriptedPicker};

    use super::*;

    fn agent(picker: ScriptedPicker) -> ChatAgent {
        let config = ChatConfig::default().with_assistant_name(Some("Robo"));
        ChatAgent::new(
            Arc::new(IntentCatalog::default()),
            config,
            Box::new(picker),
            ChatMetrics::shared(),
        )
        .with_clock(Box::new(FixedClock(
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )))
    }

    #[test]
    fn empty_input_asks_for_text_without_counting() {
        let mut agent = agent(ScriptedPicker::new());
        let mut session = agent.start_session();
        let reply = agent.handle_turn(&mut session, "   ");
        assert_eq!(reply.outcome, TurnOutcome::Empty);
        assert_eq!(reply.text, EMPTY_INPUT_REPLY);
        assert_eq!(session.turns(), 0);
        assert_eq!(agent.metrics().snapshot().empty_inputs_total, 1);
    }

    #[test]
    fn punctuation_only_input_falls_back() {
        let mut agent = agent(ScriptedPicker::new());
        let mut session = agent.start_session();
        let reply = agent.handle_turn(&mut session, "?!");
        assert_eq!(reply.outcome, TurnOutcome::Fallback);
        assert_eq!(session.turns(), 1);
    }

    #[test]
    fn time_question_reads_the_clock() {
        let mut agent = agent(ScriptedPicker::new());
        let mut session = agent.start_session();
        let reply = agent.handle_turn(&mut session, "What time is it?");
        assert_eq!(reply.outcome, TurnOutcome::Matched(IntentId::TimeQuery));
        assert_eq!(
            reply.text,
            "It's currently 09:30 AM on Tuesday, March 05, 2024"
        );
    }

    #[test]
    fn faults_become_apologies_and_session_continues() {
        let mut catalog = IntentCatalog::default();
        catalog.default_replies.clear();
        let mut agent = ChatAgent::new(
            Arc::new(catalog),
            ChatConfig::default(),
            Box::new(ScriptedPicker::new()),
            ChatMetrics::shared(),
        );
        let mut session = agent.start_session();

        let reply = agent.handle_turn(&mut session, "asdkfj random text");
        assert_eq!(reply.outcome, TurnOutcome::Fault);
        assert_eq!(reply.text, FAULT_REPLY);
        assert!(!session.is_terminated());
        assert_eq!(agent.metrics().snapshot().faults_total, 1);

        let reply = agent.handle_turn(&mut session, "hello there");
        assert_eq!(reply.outcome, TurnOutcome::Matched(IntentId::Greeting));
        assert_eq!(session.turns(), 2);
    }

    struct PanickingPicker;

    impl ReplyPicker for PanickingPicker {
        fn pick_index(&mut self, _len: usize) -> usize {
            panic!("picker failure");
        }

        fn chance(&mut self, _probability: f64) -> bool {
            false
        }
    }

    #[test]
    fn panics_while_composing_become_apologies() {
        let mut agent = ChatAgent::new(
            Arc::new(IntentCatalog::default()),
            ChatConfig::default(),
            Box::new(PanickingPicker),
            ChatMetrics::shared(),
        );
        let mut session = agent.start_session();

        let reply = agent.handle_turn(&mut session, "asdkfj random text");
        assert_eq!(reply.outcome, TurnOutcome::Fault);
        assert_eq!(reply.text, FAULT_REPLY);
        assert!(!reply.terminal);
        assert!(!session.is_terminated());
        assert_eq!(session.turns(), 1);
        assert_eq!(agent.metrics().snapshot().faults_total, 1);

        // The time reply never draws from the picker.
        let reply = agent.handle_turn(&mut session, "what time is it");
        assert_eq!(reply.outcome, TurnOutcome::Matched(IntentId::TimeQuery));
        assert_eq!(session.turns(), 2);
    }

    #[test]
    fn interrupt_terminates_and_later_turns_are_rejected() {
        let mut agent = agent(ScriptedPicker::new());
        let mut session = agent.start_session();
        assert_eq!(agent.interrupt(&mut session), INTERRUPT_REPLY);
        assert!(session.is_terminated());

        let reply = agent.handle_turn(&mut session, "hello");
        assert_eq!(reply.outcome, TurnOutcome::Rejected);
        assert_eq!(session.turns(), 0);
    }

    #[test]
    fn name_prompt_is_attached_to_non_terminal_replies() {
        let picker = ScriptedPicker::new()
            .with_indices([0, 2])
            .with_chances([true]);
        let mut agent = agent(picker);
        let mut session = agent.start_session();

        let reply = agent.handle_turn(&mut session, "tell me a joke");
        assert_eq!(
            reply.follow_up.as_deref(),
            Some("What's your name, if you don't mind me asking?")
        );
        assert_eq!(reply.lines().len(), 2);
    }

    #[test]
    fn help_commands_are_exact_matches() {
        let agent = agent(ScriptedPicker::new());
        assert!(agent.is_help_command(" Help! "));
        assert!(agent.is_help_command("commands"));
        assert!(!agent.is_help_command("can you help"));
    }

    #[test]
    fn missing_catalog_path_uses_builtin() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog, IntentCatalog::default());
        let missing = load_catalog(Some(Path::new("/definitely/not/here.json")));
        assert!(missing.is_err());
    }
}
