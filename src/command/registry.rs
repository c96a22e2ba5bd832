/*!
 * CommandRegistry - the set of commands a front-end exposes
 * Responsible for: registration, lookup by name or alias, invocation, stats
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, error, info};

use super::error::{CommandError, CommandResult};
use super::r#trait::{Command, CommandArgs, CommandOutput, Invoke};
use super::schema::CommandSchema;
use crate::config::InvocationConfig;

/// Per-command execution statistics
#[derive(Debug, Clone, Default)]
pub struct CommandExecutionStats {
    pub total_calls: u64,
    pub success_count: u64,
    pub failure_count: u64,
    pub total_execution_time_ms: u64,
    pub avg_execution_time_ms: u64,
    pub last_called_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Clone)]
pub struct CommandRegistry {
    commands: Arc<RwLock<HashMap<String, Arc<dyn Command>>>>,
    aliases: Arc<RwLock<HashMap<String, String>>>,
    execution_stats: Arc<RwLock<HashMap<String, CommandExecutionStats>>>,
    config: InvocationConfig,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::with_config(InvocationConfig::default())
    }

    pub fn with_config(config: InvocationConfig) -> Self {
        Self {
            commands: Arc::new(RwLock::new(HashMap::new())),
            aliases: Arc::new(RwLock::new(HashMap::new())),
            execution_stats: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub fn config(&self) -> &InvocationConfig {
        &self.config
    }

    pub fn register(&self, command: Arc<dyn Command>) -> CommandResult<()> {
        let name = command.name().to_string();
        {
            let mut commands = self.commands.write();
            if commands.contains_key(&name) || self.aliases.read().contains_key(&name) {
                return Err(CommandError::Configuration(format!(
                    "command {} is already registered",
                    name
                )));
            }
            commands.insert(name.clone(), command);
        }
        self.execution_stats
            .write()
            .insert(name.clone(), CommandExecutionStats::default());

        info!("registered command: {}", name);
        Ok(())
    }

    pub fn unregister(&self, name: &str) -> CommandResult<()> {
        let removed = self.commands.write().remove(name);
        if removed.is_some() {
            self.aliases.write().retain(|_, v| v != name);
            self.execution_stats.write().remove(name);
            Ok(())
        } else {
            Err(CommandError::UnknownCommand(name.to_string()))
        }
    }

    pub fn add_alias(&self, alias: &str, command_name: &str) -> CommandResult<()> {
        let commands = self.commands.read();
        if !commands.contains_key(command_name) {
            return Err(CommandError::UnknownCommand(command_name.to_string()));
        }
        if commands.contains_key(alias) {
            return Err(CommandError::Configuration(format!(
                "alias {} shadows a registered command",
                alias
            )));
        }
        let mut aliases = self.aliases.write();
        if let Some(existing) = aliases.get(alias) {
            return Err(CommandError::Configuration(format!(
                "alias {} already points at {}",
                alias, existing
            )));
        }
        aliases.insert(alias.to_string(), command_name.to_string());
        debug!("added command alias: {} -> {}", alias, command_name);
        Ok(())
    }

    fn resolve(&self, name: &str) -> Option<(String, Arc<dyn Command>)> {
        let commands = self.commands.read();
        if let Some(command) = commands.get(name) {
            return Some((name.to_string(), Arc::clone(command)));
        }
        let aliases = self.aliases.read();
        let actual = aliases.get(name)?;
        commands
            .get(actual)
            .map(|command| (actual.clone(), Arc::clone(command)))
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.resolve(name).map(|(_, command)| command)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Validates, fills defaults and runs `name`; locks are released while it runs
    pub fn invoke(&self, name: &str, args: CommandArgs) -> CommandResult<CommandOutput> {
        let (resolved, command) = self
            .resolve(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;

        let start = Instant::now();
        let result = command.call_with(args, &self.config);
        let elapsed = start.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => self.update_stats(&resolved, true, elapsed),
            Err(e) => {
                self.update_stats(&resolved, false, elapsed);
                error!("command {} failed: {}", resolved, e);
            }
        }
        result
    }

    fn update_stats(&self, name: &str, success: bool, execution_time_ms: u64) {
        let mut stats = self.execution_stats.write();
        if let Some(s) = stats.get_mut(name) {
            s.total_calls += 1;
            if success {
                s.success_count += 1;
            } else {
                s.failure_count += 1;
            }
            s.total_execution_time_ms += execution_time_ms;
            s.avg_execution_time_ms = s.total_execution_time_ms / s.total_calls.max(1);
            s.last_called_at = Some(chrono::Utc::now());
        }
    }

    pub fn stats(&self, name: &str) -> Option<CommandExecutionStats> {
        self.execution_stats.read().get(name).cloned()
    }

    /// Schemas of all registered commands, sorted by name
    pub fn schemas(&self) -> Vec<CommandSchema> {
        let commands = self.commands.read();
        let mut schemas: Vec<CommandSchema> =
            commands.values().map(|c| c.schema().clone()).collect();
        schemas.sort_by(|a, b| a.name().cmp(b.name()));
        schemas
    }

    pub fn list_commands(&self) -> Vec<String> {
        let commands = self.commands.read();
        let mut names: Vec<String> = commands.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.read().is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
