//! Terminal front end for a live interview session.
//!
//! Reads commands and answers from stdin, one per line, and prints the
//! transcript as it grows. Logs go to stderr.

use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use live_interview::adapters::http::{HttpInterviewerService, ServiceClient, ServiceClientConfig};
use live_interview::application::{SessionController, TurnDelivery};
use live_interview::config::{AppConfig, LoggingConfig};
use live_interview::domain::foundation::SessionId;
use live_interview::domain::interview::{SessionError, SessionState, TemplateFallback};

type Controller = SessionController<HttpInterviewerService>;
type PendingExchange = JoinHandle<Result<TurnDelivery, SessionError>>;

const HELP: &str = "\
Commands:
  :sample            load the sample problem and concepts
  :problem <text>    set the problem statement
  :concept <label>   add a key concept
  :remove <n>        remove concept number n (1-based)
  :start             start the interview
  :end               end the interview and clear the transcript
  :help              show this help
  :quit              exit
Any other line is sent as your answer.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Sample,
    Problem(String),
    Concept(String),
    Remove(usize),
    Start,
    End,
    Help,
    Quit,
    Answer(String),
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix(':') else {
            return Some(Self::Answer(line.to_string()));
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        Some(match name {
            "sample" => Self::Sample,
            "problem" => Self::Problem(arg.to_string()),
            "concept" => Self::Concept(arg.to_string()),
            "remove" => match arg.parse::<usize>() {
                Ok(n) if n > 0 => Self::Remove(n - 1),
                _ => Self::Unknown(line.to_string()),
            },
            "start" => Self::Start,
            "end" => Self::End,
            "help" => Self::Help,
            "quit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let mut client_config = ServiceClientConfig::new(config.service.base_url.clone())
        .with_timeout(config.service.timeout());
    if let Some(key) = &config.service.api_key {
        client_config = client_config.with_api_key(key.expose_secret().clone());
    }
    let client = ServiceClient::new(client_config)?;
    info!(
        base_url = %config.service.base_url,
        environment = ?config.logging.environment,
        "interviewer service configured"
    );

    let controller = Arc::new(
        SessionController::new(Arc::new(HttpInterviewerService::new(client))).with_fallback(
            Arc::new(TemplateFallback::new(config.interview.excerpt_chars)),
        ),
    );

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<PendingExchange> = None;
    let mut view = TranscriptView::default();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(command) = Command::parse(&line) else { continue };
                if command == Command::Quit {
                    break;
                }
                if let Some(exchange) = run_command(&controller, command, pending.is_some()).await {
                    println!("Interviewer is thinking...");
                    pending = Some(exchange);
                }
            }
            joined = wait_for(&mut pending) => {
                pending = None;
                match joined {
                    Ok(Ok(TurnDelivery::Answered(_))) => {}
                    Ok(Ok(TurnDelivery::Discarded)) => continue,
                    Ok(Err(err)) => println!("{err}"),
                    Err(join_error) => error!(error = %join_error, "turn exchange aborted"),
                }
            }
        }

        view.render(&controller.snapshot().await);
    }

    if let Some(exchange) = pending {
        exchange.abort();
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json_output() {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Runs one command. Start and Send are spawned so that `:end` stays
/// responsive while the interviewer is thinking.
async fn run_command(
    controller: &Arc<Controller>,
    command: Command,
    in_flight: bool,
) -> Option<PendingExchange> {
    let outcome = match command {
        Command::Sample => controller.load_sample().await,
        Command::Problem(text) => controller.set_problem_statement(text).await,
        Command::Concept(label) => match controller.add_concept(label).await {
            Ok(false) => {
                println!("Concept label is empty");
                Ok(())
            }
            other => other.map(|_| ()),
        },
        Command::Remove(index) => match controller.remove_concept(index).await {
            Ok(false) => {
                println!("No concept number {}", index + 1);
                Ok(())
            }
            other => other.map(|_| ()),
        },
        Command::End => {
            controller.reset().await;
            println!("Interview ended.");
            Ok(())
        }
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
        Command::Unknown(line) => {
            println!("Unknown command: {line} (try :help)");
            Ok(())
        }
        Command::Start | Command::Answer(_) if in_flight => {
            println!("Interviewer is thinking...");
            Ok(())
        }
        Command::Start => {
            let controller = Arc::clone(controller);
            return Some(tokio::spawn(async move { controller.start().await }));
        }
        Command::Answer(text) => {
            let controller = Arc::clone(controller);
            return Some(tokio::spawn(async move { controller.send(text).await }));
        }
        Command::Quit => Ok(()),
    };

    if let Err(err) = outcome {
        println!("{err}");
    }
    None
}

async fn wait_for(
    pending: &mut Option<PendingExchange>,
) -> Result<Result<TurnDelivery, SessionError>, JoinError> {
    match pending {
        Some(exchange) => exchange.await,
        None => std::future::pending().await,
    }
}

/// Tracks which turns of the current session have been printed.
#[derive(Default)]
struct TranscriptView {
    session_id: Option<SessionId>,
    shown: usize,
}

impl TranscriptView {
    /// Prints turns added since the last render.
    fn render(&mut self, state: &SessionState) {
        if self.session_id != Some(state.session_id()) {
            self.session_id = Some(state.session_id());
            self.shown = 0;
        }

        let turns = state.transcript().turns();
        for turn in &turns[self.shown.min(turns.len())..] {
            println!(
                "[{}] {}: {}",
                turn.created_at().local_time_of_day(),
                turn.speaker().label(),
                turn.content()
            );
        }
        if turns.len() > self.shown && state.is_started() {
            println!("{}", state.status_line());
        }
        self.shown = turns.len();
    }
}
