/*!
 * FnCommand - pairs a schema (often loaded from a catalog) with a closure
 */

use super::error::CommandResult;
use super::r#trait::{Command, CommandArgs, CommandOutput};
use super::schema::CommandSchema;

type Routine = dyn Fn(CommandArgs) -> CommandResult<CommandOutput> + Send + Sync;

pub struct FnCommand {
    schema: CommandSchema,
    routine: Box<Routine>,
}

impl FnCommand {
    pub fn new<F>(schema: CommandSchema, routine: F) -> Self
    where
        F: Fn(CommandArgs) -> CommandResult<CommandOutput> + Send + Sync + 'static,
    {
        Self {
            schema,
            routine: Box::new(routine),
        }
    }
}

impl Command for FnCommand {
    fn schema(&self) -> &CommandSchema {
        &self.schema
    }

    fn run(&self, args: CommandArgs) -> CommandResult<CommandOutput> {
        (self.routine)(args)
    }
}

impl std::fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCommand")
            .field("name", &self.schema.name())
            .finish_non_exhaustive()
    }
}
