// Command core: parameter schemas, validation and invocation

pub mod collection;
pub mod data_type;
pub mod error;
pub mod function;
pub mod parameter;
pub mod registry;
pub mod schema;
pub mod r#trait;

pub use collection::ParameterCollection;
pub use data_type::DataType;
pub use error::{CommandError, CommandErrorKind, CommandResult, ErrorInfo};
pub use function::FnCommand;
pub use parameter::{Parameter, ParameterBuilder};
pub use r#trait::{
    fill_defaults, unknown_arguments, validate_arguments, BaseCommand, Command, CommandArgs,
    CommandOutput, Invoke,
};
pub use registry::{CommandExecutionStats, CommandRegistry};
pub use schema::CommandSchema;
