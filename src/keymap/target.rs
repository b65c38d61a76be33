//! Command targets and which component kinds a binding applies to

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A node in the host document, the entity a command executes against
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    /// Component type name, e.g. `"Button"`; this is the node's kind
    pub component_name: String,
    pub props: Value,
}

impl Node {
    pub fn new(id: impl Into<String>, component_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_name: component_name.into(),
            props: Value::Null,
        }
    }

    /// Attach component props (builder pattern)
    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }
}

/// The set of component kinds a binding may run against
///
/// Serialized as `"*"` for [`Applicability::Any`] or a list of component names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Applicability {
    #[default]
    Any,
    Components(Vec<String>),
}

impl Applicability {
    pub fn components<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Applicability::Components(names.into_iter().map(Into::into).collect())
    }

    /// Whether a binding with this applicability may run against `node`
    pub fn applies_to(&self, node: &Node) -> bool {
        match self {
            Applicability::Any => true,
            Applicability::Components(names) => names.iter().any(|n| *n == node.component_name),
        }
    }
}

impl Serialize for Applicability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Applicability::Any => serializer.serialize_str("*"),
            Applicability::Components(names) => names.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Applicability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(s) if s == "*" => Applicability::Any,
            Raw::One(s) => Applicability::Components(vec![s]),
            Raw::Many(names) => Applicability::Components(names),
        })
    }
}
