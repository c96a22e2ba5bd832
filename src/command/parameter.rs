/*!
 * Parameter - one named input or output slot of a command
 */

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::data_type::DataType;
use super::error::{CommandError, CommandResult};

/// Immutable descriptor of a named, typed slot
///
/// `default` and `default_description` use `None` as the absence marker, so
/// a declared default of `0`, `""` or `null` stays distinct from "no default".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterDef", into = "ParameterDef")]
pub struct Parameter {
    name: String,
    data_type: DataType,
    description: String,
    required: bool,
    default: Option<Value>,
    default_description: Option<String>,
}

impl Parameter {
    /// Full constructor; rejects a required parameter that declares a default
    pub fn try_new(
        name: impl Into<String>,
        data_type: DataType,
        description: impl Into<String>,
        required: bool,
        default: Option<Value>,
        default_description: Option<String>,
    ) -> CommandResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CommandError::Configuration(
                "parameter name must not be empty".to_string(),
            ));
        }

        if let Some(value) = &default {
            if required {
                return Err(CommandError::Configuration(format!(
                    "required parameter {} must not declare a default",
                    name
                )));
            }
            if !data_type.accepts(value) {
                return Err(CommandError::Configuration(format!(
                    "default {} of parameter {} is not a valid {}",
                    value, name, data_type
                )));
            }
        }

        Ok(Self {
            name,
            data_type,
            description: description.into(),
            required,
            default,
            default_description,
        })
    }

    pub fn builder(name: impl Into<String>, data_type: DataType) -> ParameterBuilder {
        ParameterBuilder {
            name: name.into(),
            data_type,
            description: String::new(),
            required: false,
            default: None,
            default_description: None,
        }
    }

    /// Output slot; outputs are never required and carry no default
    pub fn output(
        name: impl Into<String>,
        data_type: DataType,
        description: impl Into<String>,
    ) -> CommandResult<Self> {
        Self::try_new(name, data_type, description, false, None, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn default_description(&self) -> Option<&str> {
        self.default_description.as_deref()
    }
}

pub struct ParameterBuilder {
    name: String,
    data_type: DataType,
    description: String,
    required: bool,
    default: Option<Value>,
    default_description: Option<String>,
}

impl ParameterBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn default_description(mut self, text: impl Into<String>) -> Self {
        self.default_description = Some(text.into());
        self
    }

    pub fn build(self) -> CommandResult<Parameter> {
        Parameter::try_new(
            self.name,
            self.data_type,
            self.description,
            self.required,
            self.default,
            self.default_description,
        )
    }
}

/// Wire shape used by catalogs; every field but `name`/`type` is optional
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ParameterDef {
    name: String,
    #[serde(rename = "type")]
    data_type: DataType,
    #[serde(default)]
    description: String,
    #[serde(default)]
    required: bool,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_description: Option<String>,
}

// An explicit `null` is still a declared default
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TryFrom<ParameterDef> for Parameter {
    type Error = CommandError;

    fn try_from(def: ParameterDef) -> CommandResult<Self> {
        Parameter::try_new(
            def.name,
            def.data_type,
            def.description,
            def.required,
            def.default,
            def.default_description,
        )
    }
}

impl From<Parameter> for ParameterDef {
    fn from(param: Parameter) -> Self {
        Self {
            name: param.name,
            data_type: param.data_type,
            description: param.description,
            required: param.required,
            default: param.default,
            default_description: param.default_description,
        }
    }
}
