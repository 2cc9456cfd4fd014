//! Run Agent use case
//!
//! Drives the tool-calling loop:
//!
//! ```text
//! Init ─▶ AwaitModel ─▶ ProcessToolCalls ─┐
//!            ▲                            │
//!            └────────────────────────────┘
//!            │
//!            ├─▶ Done    (answer without tool calls)
//!            └─▶ Failed  (transport error, empty response,
//!                         iteration cap, cancellation)
//! ```
//!
//! Strictly sequential: one model call at a time, then each requested tool
//! in the order the model emitted it. Tool failures of any kind go back to
//! the model as tool-role messages; only the cases listed under `Failed`
//! end the run.

mod types;

pub use types::{RunAgentError, RunAgentInput, RunAgentOutput, RunErrorKind};

use crate::config::ExecutionParams;
use crate::ports::agent_progress::{AgentProgressNotifier, NoAgentProgress};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{ChatRequest, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::shared::{check_cancelled, panic_message};
use futures::FutureExt;
use serde_json::{Value, json};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wolf_domain::{ChatResponse, Conversation, LoopPhase, Message, truncate};

/// Use case for running the agent loop
pub struct RunAgentUseCase {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    schema_converter: Arc<dyn ToolSchemaPort>,
    progress: Arc<dyn AgentProgressNotifier>,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl Clone for RunAgentUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            tool_executor: self.tool_executor.clone(),
            schema_converter: self.schema_converter.clone(),
            progress: self.progress.clone(),
            conversation_logger: self.conversation_logger.clone(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

/// Mutable state of one run
struct RunState {
    conversation: Conversation,
    phase: LoopPhase,
    iterations: usize,
}

impl RunAgentUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        schema_converter: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            gateway,
            tool_executor,
            schema_converter,
            progress: Arc::new(NoAgentProgress),
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn AgentProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Run the loop until a final answer or a terminal error.
    ///
    /// Never returns `Err`: failures are reported in the output together
    /// with the conversation as it stood.
    pub async fn execute(&self, input: RunAgentInput, params: &ExecutionParams) -> RunAgentOutput {
        let user = Message::user(&input.prompt).with_images(input.images.clone());
        let mut state = RunState {
            conversation: Conversation::start(params.system_prompt.as_deref(), user),
            phase: LoopPhase::Init,
            iterations: 0,
        };

        self.conversation_logger.log(ConversationEvent::new(
            "user_prompt",
            json!({
                "prompt": input.prompt,
                "images": input.images,
                "model": params.model,
            }),
        ));

        let outcome = AssertUnwindSafe(self.run_loop(&mut state, &input.images, params))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(RunAgentError::Internal(panic_message(panic.as_ref()))));

        let output = match outcome {
            Ok(text) => {
                self.progress.on_final_answer(&text);
                RunAgentOutput::success(text, state.conversation.into_messages(), state.iterations)
            }
            Err(error) => {
                self.transition(&mut state, LoopPhase::Failed);
                if error.is_cancelled() {
                    info!("Run cancelled");
                } else {
                    warn!(error = %error, "Run failed");
                }
                RunAgentOutput::failure(error, state.conversation.into_messages(), state.iterations)
            }
        };

        self.conversation_logger.log(ConversationEvent::new(
            "run_finished",
            json!({
                "ok": output.ok,
                "error": output.error_message(),
                "iterations": output.iterations,
                "message_count": output.messages.len(),
            }),
        ));

        output
    }

    async fn run_loop(
        &self,
        state: &mut RunState,
        images: &[String],
        params: &ExecutionParams,
    ) -> Result<String, RunAgentError> {
        let max = params.max_tool_iterations;
        let tools = self
            .schema_converter
            .all_tools_schema(&self.tool_executor.definitions());

        loop {
            if state.iterations >= max {
                return Err(RunAgentError::MaxIterations(max));
            }
            check_cancelled(&self.cancellation_token)?;

            state.iterations += 1;
            self.transition(state, LoopPhase::AwaitModel);
            self.progress.on_iteration(state.iterations, max);
            debug!(iteration = state.iterations, max, "Calling model");

            let mut request =
                ChatRequest::new(&params.model, state.conversation.messages().to_vec())
                    .with_tools(tools.clone());
            // Images belong to the user's prompt; later turns only carry text
            if state.iterations == 1 {
                request = request.with_images(images.to_vec());
            }

            let response = self.call_model(request).await?;
            let choice = response
                .into_first_choice()
                .ok_or(RunAgentError::EmptyResponse)?;
            let calls = choice.message.extract_tool_calls();

            self.conversation_logger.log(ConversationEvent::new(
                "llm_response",
                json!({
                    "iteration": state.iterations,
                    "content": choice.message.text(),
                    "finish_reason": choice.finish_reason,
                    "tool_calls": calls,
                }),
            ));

            if calls.is_empty() {
                let text = choice.message.text().to_string();
                if !text.is_empty() {
                    state.conversation.push(Message::assistant(&text));
                }
                self.transition(state, LoopPhase::Done);
                return Ok(text);
            }

            self.transition(state, LoopPhase::ProcessToolCalls);
            self.progress.on_tool_calls_requested(calls.len());
            state.conversation.push(choice.message.to_message());

            for call in calls {
                if call.is_nameless() {
                    warn!(id = ?call.id, "Skipping tool call without a name");
                    self.progress.on_tool_skipped("Tool call without a name");
                    continue;
                }
                check_cancelled(&self.cancellation_token)?;

                let args_text = call.arguments.to_value().to_string();
                info!(tool = %call.name, args = %truncate(&args_text, 200), "Tool call");
                self.progress.on_tool_call(&call.name, &args_text);
                self.conversation_logger.log(ConversationEvent::new(
                    "tool_call",
                    json!({
                        "tool": call.name,
                        "id": call.id,
                        "arguments": call.arguments.to_value(),
                    }),
                ));

                let execution = self.tool_executor.execute(&call).await;

                debug!(tool = %call.name, ok = execution.ok, "Tool finished");
                self.progress.on_tool_result(&call.name, &execution);
                self.conversation_logger.log(ConversationEvent::new(
                    "tool_result",
                    serde_json::to_value(&execution).unwrap_or(Value::Null),
                ));

                state.conversation.push(Message::tool(
                    &call.name,
                    execution.to_message_content(),
                    call.id.clone(),
                ));
            }
        }
    }

    /// One gateway call, abandoned if the run is cancelled meanwhile
    async fn call_model(&self, request: ChatRequest) -> Result<ChatResponse, RunAgentError> {
        let call = self.gateway.chat(request);
        match &self.cancellation_token {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(RunAgentError::Cancelled),
                result = call => result.map_err(RunAgentError::from),
            },
            None => call.await.map_err(RunAgentError::from),
        }
    }

    fn transition(&self, state: &mut RunState, next: LoopPhase) {
        if !state.phase.can_transition_to(next) {
            warn!(from = %state.phase, to = %next, "Unexpected loop transition");
        }
        debug!(from = %state.phase, to = %next, "Loop phase");
        state.phase = next;
        self.progress.on_phase_change(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolCatalog;
    use crate::ports::confirmation::DenyAllConfirmation;
    use crate::ports::llm_gateway::GatewayError;
    use crate::ports::tool_handler::{ToolFault, ToolHandler};
    use crate::use_cases::execute_tool::ToolExecutor;
    use async_trait::async_trait;
    use serde_json::Map;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wolf_domain::{
        CommandRules, ParamType, RiskLevel, RiskPolicy, Role, ToolArguments, ToolCall,
        ToolDefinition, ToolParameter, TrustLevel,
    };

    // ==================== Test Infrastructure ====================

    /// Mock gateway that replays scripted responses in order
    struct ScriptedGateway {
        responses: Mutex<VecDeque<Result<ChatResponse, GatewayError>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedGateway {
        fn new(responses: Vec<Result<ChatResponse, GatewayError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        fn provider_name(&self) -> &str {
            "scripted"
        }

        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, GatewayError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ChatResponse::from_text("(no more responses)")))
        }
    }

    /// Gateway that never answers
    struct HangingGateway;

    #[async_trait]
    impl LlmGateway for HangingGateway {
        fn provider_name(&self) -> &str {
            "hanging"
        }

        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, GatewayError> {
            std::future::pending().await
        }
    }

    struct CountingHandler {
        calls: AtomicUsize,
    }

    impl CountingHandler {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }

        fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ToolHandler for CountingHandler {
        async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolFault> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "items": [], "path": arguments.get("path") }))
        }
    }

    struct NameOnlySchema;

    impl ToolSchemaPort for NameOnlySchema {
        fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
            json!({ "name": tool.name })
        }
    }

    struct Fixture {
        list: Arc<CountingHandler>,
        delete: Arc<CountingHandler>,
        executor: Arc<ToolExecutor>,
    }

    fn fixture(trust: TrustLevel) -> Fixture {
        let list = CountingHandler::new();
        let delete = CountingHandler::new();
        let catalog = ToolCatalog::builder()
            .register(
                ToolDefinition::new("list_directory", "List a directory", RiskLevel::Safe)
                    .with_parameter(ToolParameter::new("path", "Directory", false).with_default("."))
                    .with_parameter(
                        ToolParameter::new("recursive", "Recurse", false)
                            .with_type(ParamType::Boolean)
                            .with_default(false),
                    ),
                list.clone(),
            )
            .unwrap()
            .register(
                ToolDefinition::new("delete_file", "Delete a file", RiskLevel::Destructive)
                    .with_parameter(ToolParameter::new("path", "File", true)),
                delete.clone(),
            )
            .unwrap()
            .build();
        let executor = Arc::new(ToolExecutor::new(
            Arc::new(catalog),
            Arc::new(RiskPolicy::new(trust, CommandRules::empty())),
            Arc::new(DenyAllConfirmation),
        ));
        Fixture {
            list,
            delete,
            executor,
        }
    }

    fn use_case(gateway: Arc<dyn LlmGateway>, fixture: &Fixture) -> RunAgentUseCase {
        RunAgentUseCase::new(gateway, fixture.executor.clone(), Arc::new(NameOnlySchema))
    }

    fn tool_call(name: &str, args: Value) -> ChatResponse {
        ChatResponse::from_tool_calls(vec![ToolCall::new(name, ToolArguments::from_value(args))])
    }

    fn params() -> ExecutionParams {
        ExecutionParams::default().with_system_prompt(Some("system".to_string()))
    }

    fn tool_messages(output: &RunAgentOutput) -> Vec<&Message> {
        output.messages.iter().filter(|m| m.role == Role::Tool).collect()
    }

    // ==================== Flow Tests ====================

    #[tokio::test]
    async fn test_plain_answer() {
        let fx = fixture(TrustLevel::Interactive);
        let gateway = ScriptedGateway::new(vec![Ok(ChatResponse::from_text("Hi! How can I help?"))]);
        let output = use_case(gateway.clone(), &fx)
            .execute(RunAgentInput::new("hey there"), &params())
            .await;

        assert!(output.ok);
        assert_eq!(output.text.as_deref(), Some("Hi! How can I help?"));
        assert_eq!(output.messages.len(), 3);
        assert_eq!(output.messages[0].role, Role::System);
        assert_eq!(output.messages[1].role, Role::User);
        assert_eq!(output.messages[2].role, Role::Assistant);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_auto_runs_tool_then_asks_model_again() {
        let fx = fixture(TrustLevel::Auto);
        let gateway = ScriptedGateway::new(vec![
            Ok(tool_call("list_directory", json!({"path": "."}))),
            Ok(ChatResponse::from_text("The directory is empty.")),
        ]);
        let output = use_case(gateway.clone(), &fx)
            .execute(RunAgentInput::new("list files"), &params())
            .await;

        assert!(output.ok);
        assert_eq!(fx.list.count(), 1);
        assert_eq!(gateway.call_count(), 2);

        let tools = tool_messages(&output);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name.as_deref(), Some("list_directory"));
        let envelope: Value = serde_json::from_str(&tools[0].content).unwrap();
        assert_eq!(envelope["ok"], json!(true));

        // the assistant turn that asked for the tool precedes its result
        let assistant = &output.messages[2];
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.tool_calls[0].name, "list_directory");

        // second request carries the tool result back to the model
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests[1].messages.last().unwrap().role, Role::Tool);
    }

    #[tokio::test]
    async fn test_safe_only_blocks_delete() {
        let fx = fixture(TrustLevel::SafeOnly);
        let gateway = ScriptedGateway::new(vec![
            Ok(tool_call("delete_file", json!({"path": "important.txt"}))),
            Ok(ChatResponse::from_text("I am not allowed to delete files.")),
        ]);
        let output = use_case(gateway, &fx)
            .execute(RunAgentInput::new("delete important.txt"), &params())
            .await;

        assert!(output.ok);
        assert_eq!(fx.delete.count(), 0);
        let tools = tool_messages(&output);
        let envelope: Value = serde_json::from_str(&tools[0].content).unwrap();
        assert_eq!(envelope["ok"], json!(false));
        assert_eq!(envelope["error_kind"], json!("permission_denied"));
    }

    #[tokio::test]
    async fn test_iteration_cap() {
        let fx = fixture(TrustLevel::Auto);
        let responses = (0..7)
            .map(|i| Ok(tool_call("list_directory", json!({"path": format!("dir{i}")}))))
            .collect();
        let gateway = ScriptedGateway::new(responses);
        let output = use_case(gateway.clone(), &fx)
            .execute(RunAgentInput::new("keep going"), &params().with_max_tool_iterations(6))
            .await;

        assert!(!output.ok);
        assert_eq!(output.error_kind(), Some(RunErrorKind::MaxIterations));
        let message = output.error_message().unwrap();
        assert!(message.contains('6'));
        assert!(message.contains("iterations"));
        assert_eq!(tool_messages(&output).len(), 6);
        assert_eq!(gateway.call_count(), 6);
        assert_eq!(output.iterations, 6);
    }

    #[tokio::test]
    async fn test_zero_iterations_never_calls_model() {
        let fx = fixture(TrustLevel::Auto);
        let gateway = ScriptedGateway::new(vec![Ok(ChatResponse::from_text("unused"))]);
        let output = use_case(gateway.clone(), &fx)
            .execute(RunAgentInput::new("hi"), &params().with_max_tool_iterations(0))
            .await;

        assert!(!output.ok);
        assert_eq!(output.error, Some(RunAgentError::MaxIterations(0)));
        assert_eq!(gateway.call_count(), 0);
        assert_eq!(output.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_tool_does_not_end_run() {
        let fx = fixture(TrustLevel::Auto);
        let gateway = ScriptedGateway::new(vec![
            Ok(ChatResponse::from_tool_calls(vec![
                ToolCall::new("teleport", ToolArguments::default()).with_id("c1"),
                ToolCall::new("list_directory", ToolArguments::default()).with_id("c2"),
            ])),
            Ok(ChatResponse::from_text("done")),
        ]);
        let output = use_case(gateway.clone(), &fx)
            .execute(RunAgentInput::new("go"), &params())
            .await;

        assert!(output.ok);
        assert_eq!(gateway.call_count(), 2);
        let tools = tool_messages(&output);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].tool_call_id.as_deref(), Some("c1"));
        let first: Value = serde_json::from_str(&tools[0].content).unwrap();
        assert_eq!(first["error_kind"], json!("unknown_tool"));
        assert_eq!(tools[1].tool_call_id.as_deref(), Some("c2"));
        assert_eq!(fx.list.count(), 1);
    }

    #[tokio::test]
    async fn test_nameless_call_is_skipped() {
        let fx = fixture(TrustLevel::Auto);
        let gateway = ScriptedGateway::new(vec![
            Ok(ChatResponse::from_tool_calls(vec![ToolCall::new(
                "",
                ToolArguments::default(),
            )])),
            Ok(ChatResponse::from_text("ok")),
        ]);
        let output = use_case(gateway, &fx)
            .execute(RunAgentInput::new("go"), &params())
            .await;

        assert!(output.ok);
        assert!(tool_messages(&output).is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_fails_run() {
        let fx = fixture(TrustLevel::Auto);
        let gateway = ScriptedGateway::new(vec![Err(GatewayError::ConnectionError(
            "connection refused".to_string(),
        ))]);
        let output = use_case(gateway, &fx)
            .execute(RunAgentInput::new("hi"), &params())
            .await;

        assert!(!output.ok);
        assert_eq!(output.error_kind(), Some(RunErrorKind::Transport));
        assert!(output.error_message().unwrap().contains("connection refused"));
        assert_eq!(output.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_choices_fail_run() {
        let fx = fixture(TrustLevel::Auto);
        let gateway = ScriptedGateway::new(vec![Ok(ChatResponse::default())]);
        let output = use_case(gateway, &fx)
            .execute(RunAgentInput::new("hi"), &params())
            .await;

        assert_eq!(output.error, Some(RunAgentError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_images_only_sent_on_first_call() {
        let fx = fixture(TrustLevel::Auto);
        let gateway = ScriptedGateway::new(vec![
            Ok(tool_call("list_directory", json!({}))),
            Ok(ChatResponse::from_text("a cat")),
        ]);
        let input = RunAgentInput::new("what is this?").with_images(vec!["cat.png".to_string()]);
        let output = use_case(gateway.clone(), &fx).execute(input, &params()).await;

        assert!(output.ok);
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests[0].images, vec!["cat.png".to_string()]);
        assert!(requests[1].images.is_empty());
        assert_eq!(requests[0].tools, vec![json!({"name": "delete_file"}), json!({"name": "list_directory"})]);
    }

    #[tokio::test]
    async fn test_empty_final_text_is_not_appended() {
        let fx = fixture(TrustLevel::Auto);
        let gateway = ScriptedGateway::new(vec![Ok(ChatResponse::from_text(""))]);
        let output = use_case(gateway, &fx)
            .execute(RunAgentInput::new("hi"), &params())
            .await;

        assert!(output.ok);
        assert_eq!(output.text.as_deref(), Some(""));
        assert_eq!(output.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_before_start() {
        let fx = fixture(TrustLevel::Auto);
        let gateway = ScriptedGateway::new(vec![Ok(ChatResponse::from_text("hi"))]);
        let token = CancellationToken::new();
        token.cancel();
        let output = use_case(gateway.clone(), &fx)
            .with_cancellation(token)
            .execute(RunAgentInput::new("hi"), &params())
            .await;

        assert!(output.is_cancelled());
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_model_call() {
        let fx = fixture(TrustLevel::Auto);
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let output = use_case(Arc::new(HangingGateway), &fx)
            .with_cancellation(token)
            .execute(RunAgentInput::new("hi"), &params())
            .await;

        assert_eq!(output.error_kind(), Some(RunErrorKind::Cancelled));
    }
}
