//! Execute Tool use case
//!
//! [`ToolExecutor`] is the gate every model-requested tool call passes
//! through. Each step can end the call with a failed envelope:
//!
//! 1. Look up the tool in the catalog (`unknown_tool`)
//! 2. Decode the arguments into a JSON object (`invalid_arguments`)
//! 3. Validate them against the schema, applying defaults (`schema_violation`)
//! 4. Ask the risk policy, and the user if needed (`permission_denied`)
//! 5. Run the handler; errors and panics are caught (`execution_failed`)
//!
//! Nothing here returns `Err` to the caller: one tool's failure never
//! takes down the run.

use crate::catalog::{ToolCatalog, ToolEntry};
use crate::ports::confirmation::{ConfirmationPort, ConfirmationRequest};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::shared::panic_message;
use async_trait::async_trait;
use futures::FutureExt;
use serde_json::{Map, Value};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wolf_domain::policy::ConfirmationOutcome;
use wolf_domain::{
    DefaultToolValidator, PolicyDecision, RiskPolicy, ToolCall, ToolDefinition, ToolError,
    ToolExecution, ToolValidator,
};

/// Message used when the user refuses a prompt
pub const USER_DENIED_MESSAGE: &str = "Permission denied by user";

/// Policy-gated tool executor backed by a [`ToolCatalog`]
pub struct ToolExecutor {
    catalog: Arc<ToolCatalog>,
    policy: Arc<RiskPolicy>,
    confirmation: Arc<dyn ConfirmationPort>,
    validator: DefaultToolValidator,
}

impl ToolExecutor {
    pub fn new(
        catalog: Arc<ToolCatalog>,
        policy: Arc<RiskPolicy>,
        confirmation: Arc<dyn ConfirmationPort>,
    ) -> Self {
        Self {
            catalog,
            policy,
            confirmation,
            validator: DefaultToolValidator,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// Gate a validated call. `Err` carries the permission-denied error.
    async fn authorize(
        &self,
        definition: &ToolDefinition,
        arguments: &Map<String, Value>,
    ) -> Result<(), ToolError> {
        let decision = self
            .policy
            .evaluate(&definition.name, definition.risk_level, arguments);
        debug!(tool = %definition.name, ?decision, "Policy decision");

        match decision {
            PolicyDecision::Allow => Ok(()),
            PolicyDecision::AllowWithNotice(note) => {
                info!(tool = %definition.name, "{}", note);
                Ok(())
            }
            PolicyDecision::Block(reason) => {
                warn!(tool = %definition.name, "{}", reason);
                self.confirmation.notify_blocked(&definition.name, &reason);
                Err(ToolError::permission_denied(reason))
            }
            PolicyDecision::Confirm { mode, reason } => {
                let request = ConfirmationRequest::new(definition, mode, reason, arguments);
                let outcome = match self.confirmation.confirm(&request).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!(tool = %definition.name, error = %e, "Confirmation failed, denying");
                        ConfirmationOutcome::Denied
                    }
                };
                if outcome.is_allowed() {
                    info!(tool = %definition.name, ?mode, "User approved tool call");
                    Ok(())
                } else {
                    info!(tool = %definition.name, ?outcome, "User refused tool call");
                    Err(ToolError::permission_denied(USER_DENIED_MESSAGE))
                }
            }
        }
    }

    async fn invoke(&self, entry: &ToolEntry, arguments: Map<String, Value>) -> ToolExecution {
        let name = entry.definition.name.as_str();
        let outcome = AssertUnwindSafe(entry.handler.call(&arguments))
            .catch_unwind()
            .await;
        let input = Value::Object(arguments);

        match outcome {
            Ok(Ok(result)) => ToolExecution::completed(name, input, result),
            Ok(Err(fault)) => {
                warn!(tool = name, error = %fault, "Tool failed");
                ToolExecution::failed(name, Some(input), ToolError::execution_failed(fault.to_string()))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                warn!(tool = name, panic = %message, "Tool panicked");
                ToolExecution::failed(
                    name,
                    Some(input),
                    ToolError::execution_failed(format!("Tool panicked: {}", message)),
                )
            }
        }
    }
}

#[async_trait]
impl ToolExecutorPort for ToolExecutor {
    fn definitions(&self) -> Vec<&ToolDefinition> {
        self.catalog.definitions()
    }

    fn has_tool(&self, name: &str) -> bool {
        self.catalog.contains(name)
    }

    async fn execute(&self, call: &ToolCall) -> ToolExecution {
        let Some(entry) = self.catalog.get(&call.name) else {
            warn!(tool = %call.name, "Unknown tool requested");
            return ToolExecution::failed(
                &call.name,
                Some(call.arguments.to_value()),
                ToolError::unknown_tool(&call.name),
            );
        };

        let arguments = match call.arguments.resolve() {
            Ok(arguments) => arguments,
            Err(message) => {
                return ToolExecution::failed(
                    &call.name,
                    Some(call.arguments.to_value()),
                    ToolError::invalid_arguments(message),
                );
            }
        };

        let arguments = match self.validator.validate(arguments.clone(), &entry.definition) {
            Ok(validated) => validated,
            Err(message) => {
                return ToolExecution::failed(
                    &call.name,
                    Some(Value::Object(arguments)),
                    ToolError::schema_violation(message),
                );
            }
        };

        if let Err(denied) = self.authorize(&entry.definition, &arguments).await {
            return ToolExecution::failed(&call.name, Some(Value::Object(arguments)), denied);
        }

        debug!(tool = %call.name, "Invoking tool handler");
        self.invoke(entry, arguments).await
    }
}
