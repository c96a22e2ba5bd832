/*!
 * declcmd - declarative command schemas
 *
 * A command declares its named inputs and outputs once; CLI, HTTP or other
 * front-ends reuse that declaration to validate arguments, fill defaults
 * and invoke the command the same way.
 */

pub mod command;
pub mod commands;
pub mod config;
pub mod utils;

pub use command::{
    BaseCommand, Command, CommandArgs, CommandError, CommandErrorKind, CommandExecutionStats,
    CommandOutput, CommandRegistry, CommandResult, CommandSchema, DataType, ErrorInfo, FnCommand,
    Invoke, Parameter, ParameterBuilder, ParameterCollection,
};
pub use config::{InvocationConfig, UnknownArgumentPolicy};
