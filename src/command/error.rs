/*!
 * Command error handling
 *
 * Declaration mistakes, per-call validation failures and routine failures
 * share one error type so front-ends can map each kind to their own
 * rendering (usage error, HTTP 400, ...).
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while declaring or invoking commands
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    #[error("unexpected arguments: {}", .0.join(", "))]
    UnexpectedArguments(Vec<String>),

    #[error("command {0} does not implement run")]
    NotImplemented(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("cannot load config: {0}")]
    ConfigLoad(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Execution(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandErrorKind {
    Configuration,
    UnknownParameter,
    MissingParameters,
    UnexpectedArguments,
    NotImplemented,
    UnknownCommand,
    ConfigLoad,
    Io,
    Json,
    Toml,
    Execution,
}

impl CommandErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandErrorKind::Configuration => "configuration",
            CommandErrorKind::UnknownParameter => "unknown_parameter",
            CommandErrorKind::MissingParameters => "missing_parameters",
            CommandErrorKind::UnexpectedArguments => "unexpected_arguments",
            CommandErrorKind::NotImplemented => "not_implemented",
            CommandErrorKind::UnknownCommand => "unknown_command",
            CommandErrorKind::ConfigLoad => "config_load",
            CommandErrorKind::Io => "io",
            CommandErrorKind::Json => "json",
            CommandErrorKind::Toml => "toml",
            CommandErrorKind::Execution => "execution",
        }
    }

    /// Whether the caller (not the command author) is at fault
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            CommandErrorKind::UnknownParameter
                | CommandErrorKind::MissingParameters
                | CommandErrorKind::UnexpectedArguments
                | CommandErrorKind::UnknownCommand
        )
    }
}

impl CommandError {
    pub fn kind(&self) -> CommandErrorKind {
        match self {
            CommandError::Configuration(_) => CommandErrorKind::Configuration,
            CommandError::UnknownParameter(_) => CommandErrorKind::UnknownParameter,
            CommandError::MissingParameters(_) => CommandErrorKind::MissingParameters,
            CommandError::UnexpectedArguments(_) => CommandErrorKind::UnexpectedArguments,
            CommandError::NotImplemented(_) => CommandErrorKind::NotImplemented,
            CommandError::UnknownCommand(_) => CommandErrorKind::UnknownCommand,
            CommandError::ConfigLoad(_) => CommandErrorKind::ConfigLoad,
            CommandError::Io(_) => CommandErrorKind::Io,
            CommandError::Json(_) => CommandErrorKind::Json,
            CommandError::Toml(_) => CommandErrorKind::Toml,
            CommandError::Execution(_) => CommandErrorKind::Execution,
        }
    }

    pub fn is_caller_error(&self) -> bool {
        self.kind().is_caller_error()
    }

    /// Names reported by a missing-parameter failure, empty otherwise
    pub fn missing_names(&self) -> &[String] {
        match self {
            CommandError::MissingParameters(names) => names,
            _ => &[],
        }
    }
}

/// Serializable error summary handed to front-ends
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    pub kind: CommandErrorKind,
    pub message: String,
    pub is_caller_error: bool,
}

impl From<&CommandError> for ErrorInfo {
    fn from(err: &CommandError) -> Self {
        let kind = err.kind();
        Self {
            kind,
            message: err.to_string(),
            is_caller_error: kind.is_caller_error(),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;
