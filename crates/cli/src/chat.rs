use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::{Context, Result};
use parlor_agents::ChatAgent;
use parlor_core::ConversationSession;
use parlor_observability::ChatMetricsSnapshot;
use tokio::sync::mpsc;
use tracing::warn;

pub type LineReceiver = mpsc::Receiver<io::Result<String>>;

/// Reads stdin on a plain thread so a pending read never holds up runtime
/// shutdown. The channel closes on EOF.
pub fn spawn_line_reader() -> LineReceiver {
    let (tx, rx) = mpsc::channel(16);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub async fn ask_assistant_name(lines: &mut LineReceiver) -> Result<Option<String>> {
    print!("Enter a name for your chatbot (or press Enter for 'ChatBot'): ");
    io::stdout().flush()?;

    match lines.recv().await {
        Some(line) => Ok(Some(line.context("failed reading assistant name")?)),
        None => Ok(None),
    }
}

/// Runs turns until the session ends and returns it. End of input, a read
/// error and Ctrl-C all close the session with a farewell.
pub async fn run_chat(
    mut agent: ChatAgent,
    mut lines: LineReceiver,
) -> Result<ConversationSession> {
    let mut session = agent.start_session();
    print_welcome(session.assistant_name());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        print!("\n{:<8} ", "You:");
        io::stdout().flush()?;

        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    println!();
                    interrupt(&agent, &mut session);
                    break;
                };
                let line = match line {
                    Ok(line) => line,
                    Err(error) => {
                        warn!(error = %error, "stdin read failed");
                        interrupt(&agent, &mut session);
                        break;
                    }
                };

                if agent.is_help_command(&line) {
                    print_help();
                    continue;
                }

                let reply = agent.handle_turn(&mut session, &line);
                for text in reply.lines() {
                    say(&session, text);
                }
                if reply.terminal {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                println!();
                interrupt(&agent, &mut session);
                break;
            }
        }
    }

    print_statistics(&session, &agent.metrics().snapshot());
    Ok(session)
}

fn interrupt(agent: &ChatAgent, session: &mut ConversationSession) {
    let farewell = agent.interrupt(session);
    say(session, &farewell);
}

fn say(session: &ConversationSession, text: &str) {
    println!("{:<8} {}", format!("{}:", session.assistant_name()), text);
}

fn print_welcome(assistant: &str) {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("WELCOME TO {}!", assistant.to_uppercase());
    println!("{rule}");
    println!("Hello! I'm your friendly rule-based chatbot assistant!");
    println!("I can chat about various topics including:\n");
    println!("  - Greetings and small talk");
    println!("  - Questions about me");
    println!("  - Current time");
    println!("  - Jokes and humor");
    println!("  - General conversation\n");
    println!("Type 'help' for assistance or 'quit' to exit.");
    println!("Let's start chatting!");
    println!("{rule}");
}

fn print_help() {
    let rule = "-".repeat(60);
    println!("\nCHATBOT HELP");
    println!("{rule}");
    println!("Things you can try:");
    println!("  - Say hello: \"hi\", \"hello\", \"hey\"");
    println!("  - Ask how I am: \"how are you?\"");
    println!("  - Ask my name: \"what's your name?\"");
    println!("  - Request jokes: \"tell me a joke\"");
    println!("  - Ask for time: \"what time is it?\"");
    println!("  - Say thanks: \"thank you\"");
    println!("  - Say goodbye: \"bye\", \"goodbye\", \"quit\"");
    println!("{rule}");
}

fn print_statistics(session: &ConversationSession, metrics: &ChatMetricsSnapshot) {
    println!("\nChat Statistics:");
    println!("  - Total messages: {}", session.turns());
    println!(
        "  - User name: {}",
        session.user_name().unwrap_or("Not provided")
    );
    println!(
        "  - Matched: {}, fallback: {}, faults: {}",
        metrics.matched_total, metrics.fallback_total, metrics.faults_total
    );
    println!("  - Thanks for using {}!", session.assistant_name());
}
