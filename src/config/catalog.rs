/*!
 * Command catalog loader
 *
 * Loads declarative `CommandSchema` files (`*.toml` or `*.json`) so
 * front-ends can discover commands without compiling them in.
 */

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::command::schema::SchemaDef;
use crate::command::{CommandError, CommandResult, CommandSchema};

pub struct CatalogLoader;

impl CatalogLoader {
    /// Loads every schema file in `dir`, in file-name order
    ///
    /// A missing directory is an empty catalog. Any other I/O failure, an
    /// unparsable file, a broken parameter declaration or a repeated command
    /// name fails the whole load.
    pub fn load_dir(dir: &Path) -> CommandResult<Vec<CommandSchema>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("catalog directory {} not found", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(CommandError::Io(e)),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if matches!(
                path.extension().and_then(|s| s.to_str()),
                Some("toml") | Some("json")
            ) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut seen = HashSet::new();
        let mut schemas = Vec::with_capacity(paths.len());
        for path in paths {
            let schema = Self::load_one(&path)?;
            if !seen.insert(schema.name().to_string()) {
                return Err(CommandError::Configuration(format!(
                    "command {} declared twice (again in {})",
                    schema.name(),
                    path.display()
                )));
            }
            schemas.push(schema);
        }

        debug!("loaded {} command schemas from {}", schemas.len(), dir.display());
        Ok(schemas)
    }

    pub fn load_one(path: &Path) -> CommandResult<CommandSchema> {
        let raw = fs::read_to_string(path)
            .map_err(|e| CommandError::ConfigLoad(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Self::parse_json(&raw),
            _ => Self::parse_toml(&raw),
        }
    }

    /// Syntax and unknown keys surface as `Toml`; broken declarations as
    /// `Configuration`
    pub fn parse_toml(raw: &str) -> CommandResult<CommandSchema> {
        let def: SchemaDef = toml::from_str(raw)?;
        CommandSchema::try_from(def)
    }

    pub fn parse_json(raw: &str) -> CommandResult<CommandSchema> {
        let def: SchemaDef = serde_json::from_str(raw)?;
        CommandSchema::try_from(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::DataType;
    use serde_json::json;

    const SERVE_TOML: &str = r#"
name = "serve"
brief_description = "Start a server"

[[inputs]]
name = "port"
type = "integer"
description = "The port to run the server on"
default = 8080

[[inputs]]
name = "interface_module"
type = "string"
description = "The module to serve the interface for"
required = true
"#;

    #[test]
    fn test_parse_toml_schema() {
        let schema = CatalogLoader::parse_toml(SERVE_TOML).unwrap();

        assert_eq!(schema.name(), "serve");
        assert_eq!(schema.inputs().len(), 2);
        assert_eq!(schema.inputs()["port"].default(), Some(&json!(8080)));
        assert_eq!(
            schema.inputs()["interface_module"].data_type(),
            DataType::String
        );
        assert!(schema.inputs()["interface_module"].is_required());
        assert!(schema.outputs().is_none());
    }

    #[test]
    fn test_required_with_default_fails_parse() {
        let raw = r#"
name = "broken"
brief_description = "x"

[[inputs]]
name = "a"
type = "string"
required = true
default = "x"
"#;
        assert!(matches!(
            CatalogLoader::parse_toml(raw),
            Err(CommandError::Configuration(_))
        ));
    }

    #[test]
    fn test_duplicate_input_is_configuration_error() {
        let raw = r#"
name = "dup"
brief_description = "x"

[[inputs]]
name = "a"
type = "string"

[[inputs]]
name = "a"
type = "integer"
"#;
        let err = CatalogLoader::parse_toml(raw).unwrap_err();
        assert_eq!(err.kind(), crate::command::CommandErrorKind::Configuration);
        assert!(err.to_string().contains("duplicate parameter name: a"));

        let raw = json!({
            "name": "dup",
            "brief_description": "x",
            "outputs": [
                {"name": "r", "type": "string"},
                {"name": "r", "type": "string"}
            ]
        })
        .to_string();
        assert!(matches!(
            CatalogLoader::parse_json(&raw),
            Err(CommandError::Configuration(_))
        ));
    }

    #[test]
    fn test_misspelled_key_is_rejected() {
        let raw = r#"
name = "typo"
brief_description = "x"

[[inputs]]
name = "a"
type = "string"
requried = true
"#;
        let err = CatalogLoader::parse_toml(raw).unwrap_err();
        assert!(matches!(err, CommandError::Toml(_)));
        assert!(err.to_string().contains("requried"));

        let raw = json!({"name": "typo", "brief_description": "x", "input": []}).to_string();
        assert!(matches!(
            CatalogLoader::parse_json(&raw),
            Err(CommandError::Json(_))
        ));
    }

    #[test]
    fn test_parse_json_schema() {
        let raw = json!({
            "name": "sum",
            "brief_description": "add two numbers",
            "inputs": [
                {"name": "a", "type": "integer", "required": true},
                {"name": "b", "type": "integer", "default": 5}
            ],
            "outputs": [{"name": "total", "type": "integer"}]
        })
        .to_string();

        let schema = CatalogLoader::parse_json(&raw).unwrap();
        assert_eq!(schema.outputs().map(|o| o.len()), Some(1));
    }
}
