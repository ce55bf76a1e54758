//! A terminal chat for a text verification service.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io;
use tokio::sync::mpsc;
use veracity::SessionBuilder;
use veracity::core::presentation::{Indicator, ScrollAnchor, Viewport};
use veracity::core::transcript::{Content, Entry, Role};
use veracity::core::{RejectReason, Submission};
use veracity::terminal::{self, LineInput};
use veracity_http_verifier::{
    HttpVerifier, HttpVerifierConfig, HttpVerifierConfigBuilder,
};

enum UiEvent {
    Entry(Entry),
    Indicator(Indicator),
    Idle,
}

struct TerminalViewport {
    event_tx: mpsc::UnboundedSender<UiEvent>,
}

impl Viewport for TerminalViewport {
    fn scroll_to(&self, anchor: ScrollAnchor) {
        // The terminal scrolls by itself, just make sure nothing is stuck
        // in the buffer.
        trace!("scroll to {anchor:?}");
        std::io::stdout().flush().ok();
    }

    fn show_indicator(&self, indicator: Indicator) {
        self.event_tx.send(UiEvent::Indicator(indicator)).ok();
    }
}

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let verifier = HttpVerifier::new(config_from_env());
    if let Err(err) = verifier.probe().await {
        eprintln!(
            "{} verification service at {} is not reachable: {}",
            "warning:".bright_yellow().bold(),
            verifier.config().base_url(),
            err.message()
        );
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let session = SessionBuilder::with_verifier(verifier)
        .on_entry({
            let event_tx = event_tx.clone();
            move |entry| {
                event_tx.send(UiEvent::Entry(entry.clone())).ok();
            }
        })
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(UiEvent::Idle).ok();
            }
        })
        .build();
    let _presentation = session.present(TerminalViewport { event_tx });

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    println!("{}", terminal::EMPTY_HINT.bright_black());
    println!("{}\n", terminal::DISCLAIMER.bright_black().italic());

    // One reader for the whole session, so pasted lines are not lost.
    let mut stdin = io::BufReader::new(io::stdin());
    let mut draft = String::new();
    'outer: loop {
        print!("{}", if draft.is_empty() { "> " } else { ". " });
        std::io::stdout().flush().ok();

        let Some(line) = terminal::read_line(&mut stdin).await else {
            break;
        };
        match LineInput::parse(&line) {
            LineInput::Continue(part) => {
                draft.push_str(part);
                draft.push('\n');
                if session.set_draft(draft.clone()).is_err() {
                    break;
                }
                continue;
            }
            LineInput::Submit(part) => draft.push_str(part),
        }
        if session.set_draft(std::mem::take(&mut draft)).is_err() {
            break;
        }

        // Leftovers from the previous round, e.g. the indicator being
        // hidden after we went idle.
        while event_rx.try_recv().is_ok() {}

        match session.submit_draft().await {
            Ok(Submission::Accepted) => {}
            Ok(Submission::Rejected(RejectReason::Blank)) => continue,
            Ok(Submission::Rejected(RejectReason::Busy)) => {
                println!("{}", "Still analyzing, hold on.".bright_black());
                continue;
            }
            Err(err) => {
                error!("{err}");
                break;
            }
        }

        // No input is read until the verification has been resolved.
        let mut progress_bar: Option<ProgressBar> = None;
        loop {
            let Some(event) = event_rx.recv().await else {
                break 'outer;
            };

            match event {
                UiEvent::Indicator(indicator) => match indicator.label() {
                    Some(label) => {
                        let progress_bar =
                            progress_bar.get_or_insert_with(|| {
                                ProgressBar::new_spinner()
                                    .with_style(progress_style.clone())
                            });
                        progress_bar.set_message(label);
                        progress_bar.tick();
                    }
                    None => {
                        if let Some(progress_bar) = progress_bar.take() {
                            progress_bar.finish_and_clear();
                        }
                    }
                },
                UiEvent::Entry(entry) => {
                    // Finish the progress bar before printing anything else.
                    if let Some(progress_bar) = progress_bar.take() {
                        progress_bar.finish_and_clear();
                    }
                    print_entry(&entry);
                }
                UiEvent::Idle => {
                    if let Some(progress_bar) = progress_bar.take() {
                        progress_bar.finish_and_clear();
                    }
                    break;
                }
            }
        }
    }
}

fn print_entry(entry: &Entry) {
    // The user has just typed it, no need to echo.
    if entry.role() == Role::User {
        return;
    }

    let bar = BAR_CHAR.bright_cyan();
    let lines = terminal::entry_lines(entry);
    match entry.content() {
        Content::Verdict(_) => {
            for (idx, line) in lines.iter().enumerate() {
                // The first two lines are the labelled fields.
                if idx < 2 {
                    println!("{bar}{}", line.bright_white().bold());
                } else {
                    println!("{bar}{}", line.bright_white());
                }
            }
        }
        Content::Text(_) => {
            let bar = BAR_CHAR.bright_red();
            for line in lines {
                println!("{bar}❌ {}", line.bright_white());
            }
        }
    }
    println!();
}

fn config_from_env() -> HttpVerifierConfig {
    let mut builder = HttpVerifierConfigBuilder::new();
    if let Ok(base_url) = env::var("VERACITY_BASE_URL") {
        builder = builder.with_base_url(base_url);
    }
    if let Ok(secs) = env::var("VERACITY_TIMEOUT_SECS") {
        match secs.parse::<u64>() {
            Ok(secs) => {
                builder = builder.with_timeout(Duration::from_secs(secs));
            }
            Err(err) => {
                warn!("ignoring VERACITY_TIMEOUT_SECS={secs:?}: {err}");
            }
        }
    }
    builder.build()
}
