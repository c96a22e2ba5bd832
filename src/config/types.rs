/*!
 * Invocation config types
 */

use serde::{Deserialize, Serialize};

/// What to do with argument keys no input parameter declares
///
/// Pass-through is the default on purpose: routines may accept ad hoc
/// context keys. `Warn` and `Reject` are opt-in for front-ends that want
/// typo detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownArgumentPolicy {
    #[default]
    PassThrough,
    Warn,
    Reject,
}

impl UnknownArgumentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PassThrough => "pass_through",
            Self::Warn => "warn",
            Self::Reject => "reject",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvocationConfig {
    pub unknown_arguments: UnknownArgumentPolicy,
    /// Emit an `info!` line per invocation with the argument keys
    pub log_invocations: bool,
}

impl InvocationConfig {
    pub fn with_unknown_arguments(mut self, policy: UnknownArgumentPolicy) -> Self {
        self.unknown_arguments = policy;
        self
    }

    pub fn with_invocation_logging(mut self) -> Self {
        self.log_invocations = true;
        self
    }
}
