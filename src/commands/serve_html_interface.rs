/*!
 * serve_html_interface - start the HTML interface for a command module
 *
 * The listener itself belongs to the HTTP front-end; this command only
 * declares the inputs and hands them to an [`InterfaceServer`].
 */

use std::sync::Arc;

use anyhow::anyhow;
use tracing::info;

use crate::command::{
    Command, CommandArgs, CommandOutput, CommandResult, CommandSchema, DataType, Parameter,
    ParameterCollection,
};

pub const DEFAULT_PORT: u16 = 8080;

/// HTTP bootstrap provided by the front-end
pub trait InterfaceServer: Send + Sync {
    /// Starts serving the commands exposed by `interface_module` on `port`
    fn start(&self, port: u16, interface_module: &str) -> anyhow::Result<()>;
}

pub struct ServeHtmlInterface {
    schema: CommandSchema,
    server: Arc<dyn InterfaceServer>,
}

impl ServeHtmlInterface {
    pub fn new(server: Arc<dyn InterfaceServer>) -> CommandResult<Self> {
        let inputs = ParameterCollection::new(vec![
            Parameter::builder("port", DataType::Integer)
                .description("The port to run the server on")
                .default(DEFAULT_PORT)
                .build()?,
            Parameter::builder("interface_module", DataType::String)
                .description("The module to serve the interface for")
                .required()
                .build()?,
        ])?;

        let schema = CommandSchema::new(
            "serve_html_interface",
            "Start the HTMLInterface server",
            inputs,
        )?
        .with_long_description(
            "Start the HTMLInterface server and load the provided interface_module and port",
        );

        Ok(Self { schema, server })
    }
}

impl Command for ServeHtmlInterface {
    fn schema(&self) -> &CommandSchema {
        &self.schema
    }

    fn run(&self, args: CommandArgs) -> CommandResult<CommandOutput> {
        let port = args
            .get("port")
            .and_then(|v| v.as_u64())
            .and_then(|p| u16::try_from(p).ok())
            .filter(|&p| p != 0)
            .ok_or_else(|| {
                anyhow!(
                    "port must be an integer in 1..=65535, got {:?}",
                    args.get("port")
                )
            })?;

        let interface_module = args
            .get("interface_module")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("interface_module must be a string"))?;

        info!(
            "starting HTML interface for {} on port {}",
            interface_module, port
        );
        self.server.start(port, interface_module)?;

        Ok(CommandOutput::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandError, Invoke};
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingServer {
        started: Mutex<Vec<(u16, String)>>,
    }

    impl InterfaceServer for RecordingServer {
        fn start(&self, port: u16, interface_module: &str) -> anyhow::Result<()> {
            self.started.lock().push((port, interface_module.to_string()));
            Ok(())
        }
    }

    fn args(value: serde_json::Value) -> CommandArgs {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_default_port() {
        let server = Arc::new(RecordingServer::default());
        let command = ServeHtmlInterface::new(server.clone()).unwrap();

        let output = command.call(args(json!({"interface_module": "demo"}))).unwrap();

        assert!(output.is_empty());
        assert_eq!(server.started.lock().as_slice(), &[(8080, "demo".to_string())]);
        assert!(command.outputs().is_none());
    }

    #[test]
    fn test_explicit_port_wins() {
        let server = Arc::new(RecordingServer::default());
        let command = ServeHtmlInterface::new(server.clone()).unwrap();

        command
            .call(args(json!({"interface_module": "demo", "port": 9000})))
            .unwrap();
        assert_eq!(server.started.lock()[0].0, 9000);
    }

    #[test]
    fn test_interface_module_is_required() {
        let command = ServeHtmlInterface::new(Arc::new(RecordingServer::default())).unwrap();
        let err = command.call(args(json!({"port": 9000}))).unwrap_err();
        assert_eq!(err.missing_names(), ["interface_module".to_string()]);
    }

    #[test]
    fn test_out_of_range_port_is_execution_error() {
        let server = Arc::new(RecordingServer::default());
        let command = ServeHtmlInterface::new(server.clone()).unwrap();

        let err = command
            .call(args(json!({"interface_module": "demo", "port": 70000})))
            .unwrap_err();
        assert!(matches!(err, CommandError::Execution(_)));
        assert!(server.started.lock().is_empty());
    }

    #[test]
    fn test_server_failure_propagates() {
        struct Refusing;
        impl InterfaceServer for Refusing {
            fn start(&self, _port: u16, _module: &str) -> anyhow::Result<()> {
                Err(anyhow!("address in use"))
            }
        }

        let command = ServeHtmlInterface::new(Arc::new(Refusing)).unwrap();
        let err = command
            .call(args(json!({"interface_module": "demo"})))
            .unwrap_err();
        assert_eq!(err.to_string(), "address in use");
    }
}
