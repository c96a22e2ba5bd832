/*!
 * Command trait & the shared invocation wrapper
 *
 * Variants implement [`Command`]: a schema plus one `run` routine.
 * Front-ends call through [`Invoke`], which every `Command` gets by blanket
 * impl, so validation and default filling behave identically for all of
 * them and cannot be overridden.
 */

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::collection::ParameterCollection;
use super::error::{CommandError, CommandResult};
use super::schema::CommandSchema;
use crate::config::{InvocationConfig, UnknownArgumentPolicy};

/// Name → value mapping handed to a command
pub type CommandArgs = Map<String, Value>;

/// Name → value mapping returned by a command
pub type CommandOutput = Map<String, Value>;

pub trait Command: Send + Sync {
    fn schema(&self) -> &CommandSchema;

    /// Runs with arguments already validated and completed with defaults.
    ///
    /// The default body is the unspecialised template behaviour.
    fn run(&self, args: CommandArgs) -> CommandResult<CommandOutput> {
        let _ = args;
        Err(CommandError::NotImplemented(self.name().to_string()))
    }

    fn name(&self) -> &str {
        self.schema().name()
    }

    fn inputs(&self) -> &ParameterCollection {
        self.schema().inputs()
    }

    fn outputs(&self) -> Option<&ParameterCollection> {
        self.schema().outputs()
    }
}

/// Checks that every required input is present, reporting all missing names
pub fn validate_arguments(inputs: &ParameterCollection, args: &CommandArgs) -> CommandResult<()> {
    let missing: Vec<String> = inputs
        .required()
        .filter(|p| !args.contains_key(p.name()))
        .map(|p| p.name().to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CommandError::MissingParameters(missing))
    }
}

/// Inserts declared defaults for absent optional inputs; present keys win
pub fn fill_defaults(inputs: &ParameterCollection, args: &mut CommandArgs) {
    for param in inputs.optional() {
        if args.contains_key(param.name()) {
            continue;
        }
        if let Some(default) = param.default() {
            debug!("default {} = {}", param.name(), default);
            args.insert(param.name().to_string(), default.clone());
        }
    }
}

/// Argument keys that no input parameter declares, in key order
pub fn unknown_arguments(inputs: &ParameterCollection, args: &CommandArgs) -> Vec<String> {
    args.keys()
        .filter(|key| !inputs.contains(key))
        .cloned()
        .collect()
}

pub trait Invoke: Command {
    fn call(&self, args: CommandArgs) -> CommandResult<CommandOutput>;

    fn call_with(
        &self,
        args: CommandArgs,
        config: &InvocationConfig,
    ) -> CommandResult<CommandOutput>;
}

impl<T: Command + ?Sized> Invoke for T {
    fn call(&self, args: CommandArgs) -> CommandResult<CommandOutput> {
        self.call_with(args, &InvocationConfig::default())
    }

    fn call_with(
        &self,
        mut args: CommandArgs,
        config: &InvocationConfig,
    ) -> CommandResult<CommandOutput> {
        let inputs = self.inputs();
        if config.log_invocations {
            info!(
                "invoking {} with [{}]",
                self.name(),
                args.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
            );
        }

        validate_arguments(inputs, &args)?;

        if config.unknown_arguments != UnknownArgumentPolicy::PassThrough {
            let unknown = unknown_arguments(inputs, &args);
            if !unknown.is_empty() {
                if config.unknown_arguments == UnknownArgumentPolicy::Reject {
                    return Err(CommandError::UnexpectedArguments(unknown));
                }
                warn!(
                    "command {} received undeclared arguments: {}",
                    self.name(),
                    unknown.join(", ")
                );
            }
        }

        fill_defaults(inputs, &mut args);
        debug!("running {} with {} arguments", self.name(), args.len());
        self.run(args)
    }
}

/// The unspecialised template: no parameters, no routine
#[derive(Debug, Clone)]
pub struct BaseCommand {
    schema: CommandSchema,
}

impl BaseCommand {
    pub fn new() -> Self {
        Self {
            schema: CommandSchema::template(),
        }
    }
}

impl Default for BaseCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for BaseCommand {
    fn schema(&self) -> &CommandSchema {
        &self.schema
    }
}
