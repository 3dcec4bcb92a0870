//! `perla` - terminal front end for a PHQ-9 interview session.
//!
//! Reads one message per line from stdin. Commands:
//! `/retry` re-sends an unanswered message, `/history` prints the exchanges,
//! `/quit` exits. Logs go to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use perla_interview::adapters::ai::OpenAIProvider;
use perla_interview::application::{InterviewSession, SessionError};
use perla_interview::config::AppConfig;

const ASSISTANT_LABEL: &str = "PerlaGPT";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.logging.init_tracing();
    tracing::info!("Starting perla v{}", env!("CARGO_PKG_VERSION"));

    config.validate()?;

    let provider = Arc::new(OpenAIProvider::new(config.ai.to_openai_config())?);
    let protocol = config.interview.load_protocol()?;
    let session =
        InterviewSession::start(provider, &protocol, config.interview.to_settings()).await?;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"Escribe un mensaje para comenzar (/retry, /history, /quit).\n")
        .await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let output = match Input::parse(&line) {
            Input::Blank => continue,
            Input::Quit => break,
            Input::History => render_history(&session),
            Input::Retry => render_result(session.retry_last().await),
            Input::Message(text) => render_result(session.submit(text).await),
        };
        stdout.write_all(output.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!(
        session_id = %session.id(),
        turns = session.transcript().len(),
        duration_secs = session.elapsed().num_seconds(),
        "Session ended"
    );
    Ok(())
}

/// One line of terminal input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Blank,
    Quit,
    History,
    Retry,
    Message(&'a str),
}

impl<'a> Input<'a> {
    /// Commands are matched on the trimmed line; messages keep the raw text.
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => Input::Blank,
            "/quit" => Input::Quit,
            "/history" => Input::History,
            "/retry" => Input::Retry,
            _ => Input::Message(line),
        }
    }
}

fn render_result(result: Result<perla_interview::application::Reply, SessionError>) -> String {
    match result {
        Ok(reply) => format!("{}: {}\n", ASSISTANT_LABEL, reply.content),
        Err(err) if err.input_recorded() => {
            let hint = match err.collaborator_error() {
                Some(cause) if !cause.is_retryable() => "Revisa la configuración antes de usar /retry",
                _ => "Usa /retry",
            };
            format!(
                "[Tu mensaje quedó registrado, pero aún no hay respuesta ({}). {}.]\n",
                err, hint
            )
        }
        Err(SessionError::ResponsePending { pending_input }) => format!(
            "[Falta la respuesta a \"{}\". Usa /retry antes de escribir otro mensaje.]\n",
            pending_input
        ),
        Err(SessionError::NothingToRetry) => "[No hay nada que reintentar.]\n".to_string(),
        Err(err) => format!("[Error: {}]\n", err),
    }
}

fn render_history<P>(session: &InterviewSession<P>) -> String
where
    P: perla_interview::ports::CompletionProvider,
{
    let mut out = String::new();
    for (user, assistant) in session.exchanges() {
        out.push_str(&format!("Tú: {}\n", user));
        match assistant {
            Some(reply) => out.push_str(&format!("{}: {}\n", ASSISTANT_LABEL, reply)),
            None => out.push_str("[sin respuesta]\n"),
        }
    }
    if out.is_empty() {
        out.push_str("[Sin mensajes todavía.]\n");
    }
    out
}
