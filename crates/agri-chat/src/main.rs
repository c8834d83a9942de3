//! A terminal chat that relays messages and images to a backend endpoint.
//!
//! Configuration comes from the environment:
//!
//! - `AGRI_CHAT_ENDPOINT`: where messages go, can be changed with
//!   `/endpoint`.
//! - `AGRI_CHAT_MODE`: `form` (default) or `conversation`.
//! - `AGRI_CHAT_FAILURE_REPLIES`: optional path to a JSON array of lines
//!   shown when a reply could not be obtained.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use agri_chat::http::{EncodingMode, HttpRelay, HttpRelayConfigBuilder};
use agri_chat::model::{CannedReplies, ErrorKind, Message};
use agri_chat::{Command, HELP, LineReader, Resolution, Session, SessionBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";
const FORM_FALLBACK_REPLY: &str = "File processed successfully.";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mode = match env::var("AGRI_CHAT_MODE") {
        Ok(mode) => match mode.parse::<EncodingMode>() {
            Ok(mode) => mode,
            Err(err) => {
                eprintln!("AGRI_CHAT_MODE: {err}");
                return;
            }
        },
        Err(_) => EncodingMode::default(),
    };
    let endpoint = env::var("AGRI_CHAT_ENDPOINT").unwrap_or_default();

    let mut config = HttpRelayConfigBuilder::with_mode(mode);
    if mode == EncodingMode::Form {
        config = config.with_fallback_reply(FORM_FALLBACK_REPLY);
    }
    let relay = HttpRelay::new(config.build());

    let mut builder = SessionBuilder::with_relay(relay)
        .with_endpoint(endpoint)
        .on_log_changed(|log| {
            trace!("log changed, {} messages", log.len());
        });
    if let Ok(path) = env::var("AGRI_CHAT_FAILURE_REPLIES") {
        match load_replies(&path) {
            Ok(replies) => builder = builder.with_failure_replies(replies),
            Err(err) => {
                eprintln!("failed to load replies from {path}: {err}");
                return;
            }
        }
    }
    let mut session = builder.build();

    println!("{}", "Agri Buddy".bold());
    println!("Type a message, or /help for commands.");

    let mut input = LineReader::stdin();
    loop {
        print_prompt(&session);

        let Some(line) = input.next_line().await else {
            break;
        };
        let Some(command) = Command::parse(&line) else {
            println!("Unknown command, try /help.");
            continue;
        };

        match command {
            Command::Send(text) => {
                session.draft_mut().set_text(text);
                send_draft(&mut session).await;
            }
            Command::Attach(path) => match agri_chat::load_attachment(&path)
                .await
            {
                Ok(attachment) => {
                    let draft = session.draft_mut();
                    let url = draft.attach(attachment);
                    debug!("attached {path} as {url}");
                }
                Err(err) => eprintln!("{}", err.bright_red()),
            },
            Command::Detach => {
                session.draft_mut().detach();
            }
            Command::Endpoint(url) => {
                session.set_endpoint(url);
                println!("Sending to {}", session.endpoint().bright_white());
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }
}

async fn send_draft(session: &mut Session) {
    let progress_bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {wide_msg}") {
        progress_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    progress_bar.set_message("Sending...");
    progress_bar.enable_steady_tick(Duration::from_millis(100));

    let result = session.submit().await;
    progress_bar.finish_and_clear();

    match result {
        Ok(Resolution::Reply(_)) => {
            if let Some(msg) = session.conversation().last() {
                print_reply(msg);
            }
        }
        Ok(Resolution::Failure { notice, .. }) => {
            println!("{}{}", BAR_CHAR.bright_red(), notice.bright_red());
        }
        Err(err) => match err.kind() {
            ErrorKind::InvalidEndpoint => {
                eprintln!("Please enter a valid API endpoint (/endpoint <url>).");
            }
            ErrorKind::EmptyDraft => {
                eprintln!("Please provide a message or upload a file.");
            }
            kind if kind.is_pre_flight() => {
                eprintln!("Please wait for the previous reply.");
            }
            _ => eprintln!("{err}"),
        },
    }
}

fn print_prompt(session: &Session) {
    let draft = session.conversation().draft();
    if let (Some(attachment), Some(url)) = (draft.attachment(), draft.preview_url())
    {
        println!(
            "{}📎 {} {}",
            BAR_CHAR.bright_yellow(),
            attachment.file_name(),
            url.dimmed()
        );
    }
    print!("> ");
    std::io::stdout().flush().ok();
}

fn print_reply(msg: &Message) {
    println!("{}🌱 {}", BAR_CHAR.bright_cyan(), msg.text().bright_white());
}

fn load_replies(path: &str) -> Result<CannedReplies, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
