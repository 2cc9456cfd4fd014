//! Permission subsystem: trust levels, command rules, risk policy and the
//! confirmation protocol.
//!
//! Everything here is pure. The executor in the application layer combines
//! a [`RiskPolicy`] decision with a confirmation port to gate each call.

pub mod confirmation;
pub mod risk_policy;
pub mod rules;
pub mod trust;

pub use confirmation::{
    ConfirmationMode, ConfirmationOutcome, DESTRUCTIVE_WARNING, PARAM_DISPLAY_LIMIT,
    STRONG_CONFIRMATION_PHRASE, display_parameters, interpret_response,
};
pub use risk_policy::{DEFAULT_COMMAND_TOOL, PolicyDecision, RiskPolicy};
pub use rules::{CommandCheck, CommandRules, normalize_command};
pub use trust::TrustLevel;
