//! Interactive terminal client for the support-desk chat service.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! deskchat
//!
//! # Point at a different server
//! deskchat --base-url http://support.example.com:8000
//!
//! # Disable colors (useful for piping output)
//! deskchat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/new` - Start a new session
//! - `/clear` - Clear the visible transcript
//! - `/history` - Reload the transcript from the server
//! - `/session` - Show session details
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use deskchat::SupportDesk;
use deskchat::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, SessionStats,
    help_text, parse_command,
};

/// Main entry point for the deskchat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("deskchat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = SupportDesk::with_options(config.base_url.clone(), config.timeout)?;
    let mut session = ChatSession::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // Quit after the in-flight request instead of dying mid-await.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Support Desk Chat");
    println!("Type /help for commands, /quit to exit\n");

    // Show the welcome banner and obtain a session up front, like the web
    // widget does on page load. A failure here is soft; the next send will
    // try again.
    renderer.transcript_replaced(&session.transcript());
    let _ = session.create_session(&mut renderer).await;

    loop {
        if interrupted.load(Ordering::Relaxed) {
            println!("\nGoodbye!");
            break;
        }

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::New => {
                            // Failure already rendered inline by the session.
                            let _ = session.reset_session(&mut renderer).await;
                        }
                        ChatCommand::Clear => {
                            session.clear_transcript(&mut renderer);
                        }
                        ChatCommand::History => {
                            // Failures are silent by design; only the
                            // replaced transcript is visible.
                            let _ = session.load_history(&mut renderer).await;
                        }
                        ChatCommand::Session => match session.session_info().await {
                            Ok(info) => {
                                println!("    Session Details:");
                                println!("      Id: {}", info.session_id);
                                println!("      Created: {}", info.created_at);
                                println!("      Active: {}", info.is_active);
                                println!("      Escalated: {}", info.escalated);
                                println!("      Messages: {}", info.message_count);
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Close => match session.close_session().await {
                            Ok(closed) => renderer.print_info(&closed.message),
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Stats => {
                            print_stats(&session.stats());
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the API. Failures surface as
                // inline transcript notices, so the error value is not
                // re-reported here.
                let _ = session.send_message(line, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats(stats: &SessionStats) {
    println!("    Session Statistics:");
    match &stats.session_id {
        Some(id) => println!("      Session: {}", id),
        None => println!("      Session: (none)"),
    }
    println!("      Messages: {}", stats.message_count);
    println!(
        "      Sends: {} ({} failed)",
        stats.sends, stats.send_failures
    );
    println!("      Sessions created: {}", stats.sessions_created);
    println!(
        "      Input: {}",
        if stats.waiting { "disabled" } else { "ready" }
    );
}
