/*!
 * ParameterCollection - ordered, name-unique set of parameters
 *
 * Write-once: after construction the collection only supports lookup and
 * iteration. `Index<&str>` is implemented, `IndexMut` is not, so name-keyed
 * assignment does not compile:
 *
 * ```compile_fail
 * use declcmd::{DataType, Parameter, ParameterCollection};
 *
 * let foo = Parameter::output("foo", DataType::String, "help").unwrap();
 * let mut params = ParameterCollection::new(vec![foo]).unwrap();
 * params["foo"] = Parameter::output("bar", DataType::Integer, "help").unwrap();
 * ```
 */

use std::collections::HashMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::error::{CommandError, CommandResult};
use super::parameter::Parameter;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Parameter>", into = "Vec<Parameter>")]
pub struct ParameterCollection {
    parameters: Vec<Parameter>,
    index: HashMap<String, usize>,
}

impl ParameterCollection {
    /// Builds the collection, failing on the first repeated name
    pub fn new(parameters: Vec<Parameter>) -> CommandResult<Self> {
        let mut index = HashMap::with_capacity(parameters.len());
        for (position, param) in parameters.iter().enumerate() {
            if index.insert(param.name().to_string(), position).is_some() {
                return Err(CommandError::Configuration(format!(
                    "duplicate parameter name: {}",
                    param.name()
                )));
            }
        }

        Ok(Self { parameters, index })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn get(&self, name: &str) -> CommandResult<&Parameter> {
        self.index
            .get(name)
            .map(|&position| &self.parameters[position])
            .ok_or_else(|| CommandError::UnknownParameter(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.parameters.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(Parameter::name)
    }

    pub fn required(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.is_required())
    }

    pub fn optional(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| !p.is_required())
    }
}

impl PartialEq for ParameterCollection {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
    }
}

impl Index<&str> for ParameterCollection {
    type Output = Parameter;

    /// Panics when `name` is not declared; use [`ParameterCollection::get`]
    /// for a fallible lookup.
    fn index(&self, name: &str) -> &Parameter {
        match self.get(name) {
            Ok(param) => param,
            Err(_) => panic!("no parameter named {}", name),
        }
    }
}

impl<'a> IntoIterator for &'a ParameterCollection {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

impl TryFrom<Vec<Parameter>> for ParameterCollection {
    type Error = CommandError;

    fn try_from(parameters: Vec<Parameter>) -> CommandResult<Self> {
        Self::new(parameters)
    }
}

impl From<ParameterCollection> for Vec<Parameter> {
    fn from(collection: ParameterCollection) -> Self {
        collection.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::data_type::DataType;
    use serde_json::json;

    fn params() -> Vec<Parameter> {
        vec![
            Parameter::builder("a", DataType::String)
                .description("help")
                .build()
                .unwrap(),
            Parameter::builder("b", DataType::Float)
                .description("help2")
                .required()
                .build()
                .unwrap(),
        ]
    }

    #[test]
    fn test_lookup_and_order() {
        let declared = params();
        let collection = ParameterCollection::new(declared.clone()).unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.parameters(), declared.as_slice());
        assert_eq!(collection.get("a").unwrap(), &declared[0]);
        assert_eq!(&collection["b"], &declared[1]);
        assert_eq!(collection.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(collection.required().count(), 1);
        assert_eq!(collection.optional().count(), 1);
    }

    #[test]
    fn test_duplicate_name_is_configuration_error_anywhere() {
        let dup = Parameter::output("a", DataType::Integer, "help3").unwrap();

        let mut at_end = params();
        at_end.push(dup.clone());
        let mut at_front = params();
        at_front.insert(0, dup.clone());
        let mut in_middle = params();
        in_middle.insert(1, dup);

        for list in [at_end, at_front, in_middle] {
            let err = ParameterCollection::new(list).unwrap_err();
            assert!(matches!(err, CommandError::Configuration(ref msg) if msg.contains("a")));
        }
    }

    #[test]
    fn test_unknown_lookup() {
        let foo = Parameter::output("foo", DataType::String, "help").unwrap();
        let collection = ParameterCollection::new(vec![foo]).unwrap();

        assert!(matches!(
            collection.get("bar"),
            Err(CommandError::UnknownParameter(ref name)) if name == "bar"
        ));
        assert_eq!(collection.get("foo").unwrap().name(), "foo");
        assert!(!collection.contains("bar"));
    }

    #[test]
    #[should_panic(expected = "no parameter named bar")]
    fn test_index_panics_on_unknown_name() {
        let collection = ParameterCollection::empty();
        let _ = &collection["bar"];
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let forward = ParameterCollection::new(params()).unwrap();
        let same = ParameterCollection::new(params()).unwrap();
        let mut reversed_list = params();
        reversed_list.reverse();
        let reversed = ParameterCollection::new(reversed_list).unwrap();

        assert_eq!(forward, same);
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let result = serde_json::from_value::<ParameterCollection>(json!([
            {"name": "x", "type": "string"},
            {"name": "x", "type": "integer"}
        ]));
        assert!(result.is_err());

        let collection = serde_json::from_value::<ParameterCollection>(json!([
            {"name": "x", "type": "string"},
            {"name": "y", "type": "integer", "default": 1}
        ]))
        .unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection["y"].default(), Some(&json!(1)));
    }
}
