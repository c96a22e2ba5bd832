/*!
 * CommandSchema - the immutable declaration attached to one command variant
 */

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::collection::ParameterCollection;
use super::error::{CommandError, CommandResult};
use super::parameter::{Parameter, ParameterDef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef")]
pub struct CommandSchema {
    name: String,
    brief_description: String,
    long_description: String,
    inputs: ParameterCollection,
    #[serde(skip_serializing_if = "Option::is_none")]
    outputs: Option<ParameterCollection>,
}

impl CommandSchema {
    pub fn new(
        name: impl Into<String>,
        brief_description: impl Into<String>,
        inputs: ParameterCollection,
    ) -> CommandResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CommandError::Configuration(
                "command name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            name,
            brief_description: brief_description.into(),
            long_description: String::new(),
            inputs,
            outputs: None,
        })
    }

    /// Schema of the unspecialised base command
    pub(crate) fn template() -> Self {
        Self {
            name: "command".to_string(),
            brief_description: "Unspecialised command template".to_string(),
            long_description: String::new(),
            inputs: ParameterCollection::empty(),
            outputs: None,
        }
    }

    pub fn with_long_description(mut self, text: impl Into<String>) -> Self {
        self.long_description = text.into();
        self
    }

    pub fn with_outputs(mut self, outputs: ParameterCollection) -> Self {
        self.outputs = Some(outputs);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brief_description(&self) -> &str {
        &self.brief_description
    }

    /// Falls back to the brief description when no long form was declared
    pub fn long_description(&self) -> &str {
        if self.long_description.is_empty() {
            &self.brief_description
        } else {
            &self.long_description
        }
    }

    pub fn inputs(&self) -> &ParameterCollection {
        &self.inputs
    }

    pub fn outputs(&self) -> Option<&ParameterCollection> {
        self.outputs.as_ref()
    }

    /// JSON-Schema object describing the inputs, for front-end discovery
    pub fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.inputs {
            let mut property = Map::new();
            if let Some(kind) = param.data_type().json_schema_type() {
                property.insert("type".to_string(), json!(kind));
            }
            property.insert("description".to_string(), json!(param.description()));
            if let Some(default) = param.default() {
                property.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name().to_string(), Value::Object(property));
        }

        let required: Vec<&str> = self.inputs.required().map(|p| p.name()).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }
}

/// Wire shape of a catalog entry; parameters are checked after parsing so
/// declaration mistakes surface as `Configuration`
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SchemaDef {
    name: String,
    brief_description: String,
    #[serde(default)]
    long_description: String,
    #[serde(default)]
    inputs: Vec<ParameterDef>,
    #[serde(default)]
    outputs: Option<Vec<ParameterDef>>,
}

fn collection_from(defs: Vec<ParameterDef>) -> CommandResult<ParameterCollection> {
    let parameters = defs
        .into_iter()
        .map(Parameter::try_from)
        .collect::<CommandResult<Vec<_>>>()?;
    ParameterCollection::new(parameters)
}

impl TryFrom<SchemaDef> for CommandSchema {
    type Error = CommandError;

    fn try_from(def: SchemaDef) -> CommandResult<Self> {
        let inputs = collection_from(def.inputs)?;
        let schema = CommandSchema::new(def.name, def.brief_description, inputs)?
            .with_long_description(def.long_description);
        Ok(match def.outputs {
            Some(outputs) => schema.with_outputs(collection_from(outputs)?),
            None => schema,
        })
    }
}
