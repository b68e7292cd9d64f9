//! Line-oriented chat view over a `ChatSession`.

use std::io::Write;

use evergreen_ai::{ChatSession, IgnoreReason, Message, Role, SubmitOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const QUIT: &str = "/quit";

pub fn render_message(msg: &Message) -> String {
    let who = match msg.role {
        Role::User => "you",
        Role::Assistant => "evergreen",
    };
    format!(
        "[{}] {who}: {}",
        msg.created_at.with_timezone(&chrono::Local).format("%H:%M"),
        msg.content
    )
}

/// Print the transcript so far, then submit each input line until EOF or `/quit`.
pub async fn run<R, W>(session: &ChatSession, input: R, out: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    for msg in session.transcript() {
        writeln!(out, "{}", render_message(&msg))?;
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == QUIT {
            break;
        }
        if session.submit(&line).await == SubmitOutcome::Ignored(IgnoreReason::EmptyInput) {
            continue;
        }
        if let Some(reply) = session.last_message() {
            writeln!(out, "{}", render_message(&reply))?;
        }
        if let Some(err) = session.last_error() {
            tracing::debug!(error = %err, "chat request failed");
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use evergreen_ai::{ChatTurn, GeneratedImage, GenerationClient, GenerationError};
    use evergreen_ai::session::{EMPTY_REPLY_FALLBACK, ERROR_FALLBACK};

    use super::*;

    struct EchoClient;

    #[async_trait]
    impl GenerationClient for EchoClient {
        async fn complete_chat(
            &self,
            context: &[ChatTurn],
            input: &str,
        ) -> Result<String, GenerationError> {
            match input {
                "fail" => Err(GenerationError::Timeout),
                "silence" => Ok(String::new()),
                _ => Ok(format!("echo {input} after {} turns", context.len())),
            }
        }

        async fn generate_image(
            &self,
            _: &str,
        ) -> Result<Option<GeneratedImage>, GenerationError> {
            Ok(None)
        }
    }

    async fn run_script(script: &str) -> (ChatSession, String) {
        let session = ChatSession::new(Arc::new(EchoClient));
        let mut out = Vec::new();
        run(&session, script.as_bytes(), &mut out).await.unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn prints_greeting_and_replies() {
        let (session, out) = run_script("hello\n").await;
        assert!(out.contains("evergreen: Hello! I'm EverGreen AI."));
        assert!(out.contains("evergreen: echo hello after 1 turns"));
        assert_eq!(session.len(), 3);
    }

    #[tokio::test]
    async fn blank_lines_and_quit() {
        let (session, out) = run_script("\n   \nfirst\n/quit\nnever sent\n").await;
        assert_eq!(session.len(), 3);
        assert!(!out.contains("never sent"));
    }

    #[tokio::test]
    async fn fallbacks_are_printed() {
        let (_, out) = run_script("fail\nsilence\n").await;
        assert!(out.contains(ERROR_FALLBACK));
        assert!(out.contains(EMPTY_REPLY_FALLBACK));
    }
}
