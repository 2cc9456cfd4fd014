//! Terminal confirmation for gated tool calls.
//!
//! What the user sees for a modifying tool:
//!
//! ```text
//! Tool: write_file
//! Write content to a file, backing up any existing file
//! Parameters:
//!   path: notes.txt
//!   content: hello
//! Proceed? (Y/n):
//! ```
//!
//! Destructive tools print a warning and require typing `YES`. Ctrl+C or
//! end of input cancels, which counts as a refusal.
//!
//! Stdin is read by one dedicated thread for the whole process. An
//! abandoned prompt leaves no blocked read behind, so runtime shutdown
//! never waits on the user.

use async_trait::async_trait;
use colored::Colorize;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell, mpsc};
use tracing::{debug, warn};
use wolf_application::{ConfirmationError, ConfirmationPort, ConfirmationRequest};
use wolf_domain::policy::{
    ConfirmationMode, ConfirmationOutcome, DESTRUCTIVE_WARNING, STRONG_CONFIRMATION_PHRASE,
    interpret_response,
};

/// Interactive [`ConfirmationPort`] reading answers from stdin
pub struct TerminalConfirmation {
    timeout: Option<Duration>,
    input: OnceCell<LineReader>,
}

impl TerminalConfirmation {
    pub fn new() -> Self {
        Self {
            timeout: None,
            input: OnceCell::new(),
        }
    }

    /// Give up (and deny) when no answer arrives in time
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TerminalConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of the prompt: tool, description, reason and parameters
pub fn render_request(request: &ConfirmationRequest) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{} {}\n", "Tool:".yellow().bold(), request.tool.bold()));
    if !request.description.is_empty() {
        out.push_str(&format!("{}\n", request.description.dimmed()));
    }
    if let Some(reason) = &request.reason {
        out.push_str(&format!("{} {}\n", "Note:".yellow(), reason));
    }
    if !request.parameters.is_empty() {
        out.push_str(&format!("{}\n", "Parameters:".cyan()));
        for (key, value) in &request.parameters {
            out.push_str(&format!("  {}: {}\n", key, value));
        }
    }
    if request.mode == ConfirmationMode::Strong {
        out.push_str(&format!("\n{} {}\n", "⚠".red().bold(), DESTRUCTIVE_WARNING.red().bold()));
    }
    out
}

/// The question asked after the body
pub fn prompt_line(mode: ConfirmationMode) -> String {
    match mode {
        ConfirmationMode::Strong => format!("Type {} to confirm: ", STRONG_CONFIRMATION_PHRASE),
        _ => "Proceed? (Y/n): ".to_string(),
    }
}

/// Message for a call refused without asking
pub fn render_blocked(tool: &str, reason: &str) -> String {
    if reason.is_empty() {
        format!("{} Tool '{}' is blocked", "⚠".yellow(), tool)
    } else {
        format!("{} {}", "⚠".yellow(), reason)
    }
}

/// Resolves once the optional timeout elapses; never without one
async fn expire(timeout: Option<Duration>) {
    match timeout {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending::<()>().await,
    }
}

/// Lines from a blocking source, read on a detached thread
struct LineReader {
    lines: Mutex<mpsc::UnboundedReceiver<String>>,
}

impl LineReader {
    fn spawn<R: BufRead + Send + 'static>(mut source: R) -> io::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("wolf-stdin".to_string())
            .spawn(move || {
                loop {
                    let mut line = String::new();
                    match source.read_line(&mut line) {
                        Ok(0) => break,
                        Ok(_) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "Stopped reading stdin");
                            break;
                        }
                    }
                }
            })?;
        Ok(Self::from_receiver(rx))
    }

    fn from_receiver(lines: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            lines: Mutex::new(lines),
        }
    }

    /// Drop lines typed while no prompt was showing
    async fn discard_pending(&self) {
        let mut lines = self.lines.lock().await;
        let mut dropped = 0;
        while lines.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!(dropped, "Discarded input typed before the prompt");
        }
    }

    /// Next line, `None` once input has ended
    async fn next_line(&self) -> Option<String> {
        self.lines.lock().await.recv().await
    }
}

/// One answer line; Ctrl+C and end of input both cancel
async fn await_answer(
    input: &LineReader,
    timeout: Option<Duration>,
) -> Result<String, ConfirmationError> {
    tokio::select! {
        line = input.next_line() => line.ok_or(ConfirmationError::Cancelled),
        _ = tokio::signal::ctrl_c() => Err(ConfirmationError::Cancelled),
        _ = expire(timeout) => Err(ConfirmationError::Timeout),
    }
}

#[async_trait]
impl ConfirmationPort for TerminalConfirmation {
    async fn confirm(
        &self,
        request: &ConfirmationRequest,
    ) -> Result<ConfirmationOutcome, ConfirmationError> {
        if !request.mode.needs_prompt() {
            return Ok(interpret_response(request.mode, ""));
        }
        if !io::stdin().is_terminal() {
            warn!(tool = %request.tool, "Cannot ask for confirmation without a terminal");
            return Err(ConfirmationError::NotInteractive);
        }

        let input = self
            .input
            .get_or_try_init(|| async { LineReader::spawn(BufReader::new(io::stdin())) })
            .await
            .map_err(|e| ConfirmationError::IoError(e.to_string()))?;
        input.discard_pending().await;

        print!("{}{}", render_request(request), prompt_line(request.mode));
        io::stdout()
            .flush()
            .map_err(|e| ConfirmationError::IoError(e.to_string()))?;

        let answer = match await_answer(input, self.timeout).await {
            Ok(answer) => answer,
            Err(ConfirmationError::Timeout) => {
                println!();
                println!("{}", "No answer, treating as denied".yellow());
                return Err(ConfirmationError::Timeout);
            }
            Err(e) => {
                println!();
                println!("{}", "Cancelled by user".yellow());
                return Err(e);
            }
        };

        let outcome = interpret_response(request.mode, &answer);
        debug!(tool = %request.tool, ?outcome, "Confirmation answered");
        if !outcome.is_allowed() {
            println!("{}", "Denied".red());
        }
        Ok(outcome)
    }

    fn notify_blocked(&self, tool: &str, reason: &str) {
        println!("{}", render_blocked(tool, reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wolf_domain::{RiskLevel, ToolDefinition};

    fn request(mode: ConfirmationMode) -> ConfirmationRequest {
        let def =
            ToolDefinition::new("delete_file", "Delete a file permanently", RiskLevel::Destructive);
        let args = json!({"path": "old.log"}).as_object().cloned().unwrap();
        ConfirmationRequest::new(&def, mode, None, &args)
    }

    #[test]
    fn test_render_simple_request() {
        let text = render_request(&request(ConfirmationMode::Simple));
        assert!(text.contains("Tool:"));
        assert!(text.contains("delete_file"));
        assert!(text.contains("Delete a file permanently"));
        assert!(text.contains("Parameters:"));
        assert!(text.contains("  path: old.log"));
        assert!(!text.contains(DESTRUCTIVE_WARNING));
    }

    #[test]
    fn test_render_strong_request_warns() {
        let text = render_request(&request(ConfirmationMode::Strong));
        assert!(text.contains(DESTRUCTIVE_WARNING));
        assert_eq!(prompt_line(ConfirmationMode::Strong), "Type YES to confirm: ");
        assert_eq!(prompt_line(ConfirmationMode::Simple), "Proceed? (Y/n): ");
    }

    #[test]
    fn test_render_reason() {
        let mut req = request(ConfirmationMode::Strong);
        req.reason = Some("matches deny pattern".to_string());
        assert!(render_request(&req).contains("matches deny pattern"));
    }

    #[test]
    fn test_render_blocked() {
        let text = render_blocked("write_file", "Tool 'write_file' is blocked in safe-only mode");
        assert!(text.contains("Tool 'write_file' is blocked in safe-only mode"));
        assert!(render_blocked("write_file", "").contains("Tool 'write_file' is blocked"));
    }

    #[tokio::test]
    async fn test_modes_without_prompt_skip_input() {
        let confirmation = TerminalConfirmation::new();
        let outcome = confirmation
            .confirm(&request(ConfirmationMode::None))
            .await
            .unwrap();
        assert_eq!(outcome, ConfirmationOutcome::Allowed);

        let outcome = confirmation
            .confirm(&request(ConfirmationMode::Blocked))
            .await
            .unwrap();
        assert_eq!(outcome, ConfirmationOutcome::Blocked);
    }

    /// A source whose reads never return
    struct Stalled;

    impl io::Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            loop {
                std::thread::park();
            }
        }
    }

    #[test]
    fn test_timed_out_prompt_does_not_block_shutdown() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let input = LineReader::spawn(BufReader::new(Stalled)).unwrap();

        let started = std::time::Instant::now();
        let answer =
            runtime.block_on(await_answer(&input, Some(Duration::from_millis(50))));
        assert!(matches!(answer, Err(ConfirmationError::Timeout)));

        drop(runtime);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_lines_typed_before_prompt_are_discarded() {
        let (tx, rx) = mpsc::unbounded_channel();
        let input = LineReader::from_receiver(rx);
        tx.send("y\n".to_string()).unwrap();

        input.discard_pending().await;
        tx.send("YES\n".to_string()).unwrap();

        let answer = await_answer(&input, Some(Duration::from_secs(5))).await.unwrap();
        assert_eq!(answer, "YES\n");
    }

    #[tokio::test]
    async fn test_end_of_input_cancels() {
        let input = LineReader::spawn(BufReader::new(io::Cursor::new("no\n"))).unwrap();
        assert_eq!(
            await_answer(&input, Some(Duration::from_secs(5))).await.unwrap(),
            "no\n"
        );
        let ended = await_answer(&input, Some(Duration::from_secs(5))).await;
        assert!(matches!(ended, Err(ConfirmationError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expire_waits_for_timeout() {
        let waited =
            tokio::time::timeout(Duration::from_secs(5), expire(Some(Duration::from_secs(1)))).await;
        assert!(waited.is_ok());
        let never = tokio::time::timeout(Duration::from_secs(5), expire(None)).await;
        assert!(never.is_err());
    }
}
