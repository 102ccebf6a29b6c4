use std::sync::Arc;

use chrono::NaiveDate;
use parlor_agents::ChatAgent;
use parlor_core::{
    ChatConfig, ConversationSession, FixedClock, IntentCatalog, IntentId, RandomPicker,
    ScriptedPicker, SessionState, TurnOutcome,
};
use parlor_observability::ChatMetrics;

fn agent_with(picker: ScriptedPicker) -> ChatAgent {
    ChatAgent::new(
        Arc::new(IntentCatalog::default()),
        ChatConfig::default().with_assistant_name(Some("Robo")),
        Box::new(picker),
        ChatMetrics::shared(),
    )
    .with_clock(Box::new(FixedClock(
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    )))
}

fn replies_for(id: IntentId) -> Vec<String> {
    IntentCatalog::default()
        .category(id)
        .map(|c| c.replies.clone())
        .unwrap_or_default()
}

/// Spends the name gate so later single words are classified normally.
fn named_session(agent: &mut ChatAgent) -> ConversationSession {
    let mut session = agent.start_session();
    agent.handle_turn(&mut session, "Alice");
    session
}

#[test]
fn hello_gets_a_greeting_reply() {
    let mut agent = agent_with(ScriptedPicker::new());
    let mut session = named_session(&mut agent);

    let reply = agent.handle_turn(&mut session, "Hello");
    assert_eq!(reply.outcome, TurnOutcome::Matched(IntentId::Greeting));
    assert!(replies_for(IntentId::Greeting).contains(&reply.text));
}

#[test]
fn quit_ends_the_session_even_before_a_name_is_known() {
    let mut agent = agent_with(ScriptedPicker::new());
    let mut session = agent.start_session();

    let reply = agent.handle_turn(&mut session, "quit");
    assert_eq!(reply.outcome, TurnOutcome::Matched(IntentId::Farewell));
    assert!(reply.terminal);
    assert!(replies_for(IntentId::Farewell).contains(&reply.text));
    assert_eq!(session.state(), SessionState::Terminated);
    assert_eq!(session.user_name(), None);
}

#[test]
fn farewell_by_substring_also_terminates() {
    let mut agent = agent_with(ScriptedPicker::new().with_chances([true]));
    let mut session = named_session(&mut agent);

    let reply = agent.handle_turn(&mut session, "ok, see you later!");
    assert!(reply.terminal);
    assert!(session.is_terminated());
    assert_eq!(reply.follow_up, None);
}

#[test]
fn first_single_word_is_captured_once() {
    let mut agent = agent_with(ScriptedPicker::new());
    let mut session = agent.start_session();

    let reply = agent.handle_turn(&mut session, "alice");
    assert_eq!(reply.outcome, TurnOutcome::NameCaptured);
    assert_eq!(
        reply.text,
        "Nice to meet you, Alice! How can I help you today?"
    );
    assert_eq!(session.user_name(), Some("Alice"));

    let reply = agent.handle_turn(&mut session, "Bob");
    assert_ne!(reply.outcome, TurnOutcome::NameCaptured);
    assert_eq!(session.user_name(), Some("Alice"));
    assert_eq!(agent.metrics().snapshot().names_captured_total, 1);
}

#[test]
fn first_word_greeting_is_taken_as_a_name() {
    // The name gate runs before classification, so a bare "Hello" as the
    // very first input becomes the user's name.
    let mut agent = agent_with(ScriptedPicker::new());
    let mut session = agent.start_session();

    let reply = agent.handle_turn(&mut session, "Hello");
    assert_eq!(reply.outcome, TurnOutcome::NameCaptured);
    assert_eq!(session.user_name(), Some("Hello"));
}

#[test]
fn unknown_text_falls_back_to_default_replies() {
    let mut agent = agent_with(ScriptedPicker::new());
    let mut session = agent.start_session();

    let reply = agent.handle_turn(&mut session, "asdkfj random text");
    assert_eq!(reply.outcome, TurnOutcome::Fallback);
    let defaults = IntentCatalog::default().default_replies;
    assert!(defaults.contains(&reply.text));
}

#[test]
fn turn_counter_counts_every_processed_input() {
    let mut agent = agent_with(ScriptedPicker::new());
    let mut session = agent.start_session();

    for (expected, input) in ["Alice", "asdkfj", "hi there", "", "thanks a lot"]
        .into_iter()
        .filter(|input| !input.is_empty())
        .enumerate()
    {
        let reply = agent.handle_turn(&mut session, input);
        assert_eq!(reply.turn, expected as u32 + 1);
    }
    assert_eq!(session.turns(), 4);

    agent.handle_turn(&mut session, "");
    assert_eq!(session.turns(), 4);
    assert_eq!(agent.metrics().snapshot().turns_total, 4);
}

#[test]
fn personalization_suffix_appears_only_after_ten_turns() {
    // An exhausted script always picks index 0: first reply, first suffix.
    let mut agent = agent_with(ScriptedPicker::new());
    let mut session = named_session(&mut agent);
    let plain = replies_for(IntentId::Greeting)[0].clone();

    for turn in 2..=10 {
        let reply = agent.handle_turn(&mut session, "hey you");
        assert_eq!(reply.turn, turn);
        assert_eq!(reply.text, plain);
    }

    let reply = agent.handle_turn(&mut session, "hey you");
    assert_eq!(reply.turn, 11);
    assert_eq!(
        reply.text,
        format!("{plain} We've been chatting for a while now!")
    );
}

#[test]
fn classification_is_stable_across_random_sources() {
    for seed in 0..8 {
        let mut agent = ChatAgent::new(
            Arc::new(IntentCatalog::default()),
            ChatConfig::default(),
            Box::new(RandomPicker::seeded(seed)),
            ChatMetrics::shared(),
        );
        let mut session = agent.start_session();
        agent.handle_turn(&mut session, "Alice");

        let reply = agent.handle_turn(&mut session, "tell me a joke please");
        assert_eq!(reply.outcome, TurnOutcome::Matched(IntentId::Joke));
        assert!(replies_for(IntentId::Joke).contains(&reply.text));
    }
}

#[test]
fn custom_catalog_drives_classification() {
    let catalog = IntentCatalog::from_json(
        r#"{
            "categories": [
                { "id": "greeting", "triggers": ["ahoy"], "replies": ["Ahoy, {assistant} here!"] },
                { "id": "farewell", "triggers": ["anchors away"], "replies": ["Fair winds!"] }
            ],
            "default_replies": ["Arr?"]
        }"#,
    )
    .unwrap();

    let mut agent = ChatAgent::new(
        Arc::new(catalog),
        ChatConfig::default().with_assistant_name(Some("Polly")),
        Box::new(ScriptedPicker::new()),
        ChatMetrics::shared(),
    );
    let mut session = agent.start_session();
    agent.handle_turn(&mut session, "Jack");

    assert_eq!(
        agent.handle_turn(&mut session, "ahoy matey").text,
        "Ahoy, Polly here!"
    );
    assert_eq!(agent.handle_turn(&mut session, "hello").text, "Arr?");
    let reply = agent.handle_turn(&mut session, "anchors away!");
    assert_eq!(reply.text, "Fair winds!");
    assert!(reply.terminal);
}

#[test]
fn turn_replies_serialize_for_logging() {
    let mut agent = agent_with(ScriptedPicker::new());
    let mut session = agent.start_session();
    let reply = agent.handle_turn(&mut session, "what time is it");

    let json = serde_json::to_value(&reply).unwrap();
    assert_eq!(json["outcome"]["kind"], "matched");
    assert_eq!(json["outcome"]["intent"], "time_query");
    assert_eq!(
        json["text"],
        "It's currently 08:00 AM on Wednesday, January 01, 2025"
    );
}
