use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Attribute mapping of a single resource, kept sorted by key for stable output.
pub type Attributes = BTreeMap<String, AttributeValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Integer(i64),
    String(String),
    Map(BTreeMap<String, String>),
}

impl AttributeValue {
    /// Converts a JSON value into an attribute, returning `None` for shapes
    /// resources cannot carry (floats, arrays, null, non-string map values).
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_i64().map(Self::Integer),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Object(obj) => obj
                .iter()
                .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect::<Option<BTreeMap<_, _>>>()
                .map(Self::Map),
            Value::Null | Value::Array(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Map(map) => {
                if map.is_empty() {
                    return write!(f, "{{}}");
                }
                let entries: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{k} = \"{v}\""))
                    .collect();
                write!(f, "{{ {} }}", entries.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceSpec {
    pub kind: String,
    pub name: String,
    pub attributes: Attributes,
}

impl ResourceSpec {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            attributes,
        }
    }

    /// Terraform-style address, e.g. `dummy_server.web`.
    pub fn address(&self) -> String {
        format!("{}.{}", self.kind, self.name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("duplicate resource declaration: {kind}.{name}")]
    Duplicate { kind: String, name: String },

    #[error("resource not found: {kind}.{name}")]
    NotFound { kind: String, name: String },
}

/// Resource declarations in the order they were declared.
///
/// A `(kind, name)` pair may appear only once. There is no removal API: once
/// loaded, the set is only read.
#[derive(Debug, Default, Clone)]
pub struct DeclarationSet {
    specs: Vec<ResourceSpec>,
    index: HashMap<(String, String), usize>,
}

impl DeclarationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs<I>(specs: I) -> Result<Self, DeclarationError>
    where
        I: IntoIterator<Item = ResourceSpec>,
    {
        let mut set = Self::new();
        for spec in specs {
            set.insert(spec)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, spec: ResourceSpec) -> Result<(), DeclarationError> {
        let key = (spec.kind.clone(), spec.name.clone());
        if self.index.contains_key(&key) {
            return Err(DeclarationError::Duplicate {
                kind: spec.kind,
                name: spec.name,
            });
        }

        tracing::debug!(address = %spec.address(), "resource declared");
        self.index.insert(key, self.specs.len());
        self.specs.push(spec);
        Ok(())
    }

    pub fn get(&self, kind: &str, name: &str) -> Option<&ResourceSpec> {
        self.index
            .get(&(kind.to_string(), name.to_string()))
            .map(|&i| &self.specs[i])
    }

    pub fn lookup(&self, kind: &str, name: &str) -> Result<&Attributes, DeclarationError> {
        self.get(kind, name)
            .map(|spec| &spec.attributes)
            .ok_or_else(|| DeclarationError::NotFound {
                kind: kind.to_string(),
                name: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceSpec> {
        self.specs.iter()
    }

    /// Distinct resource kinds, in order of first declaration.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = Vec::new();
        for spec in &self.specs {
            if !kinds.contains(&spec.kind.as_str()) {
                kinds.push(&spec.kind);
            }
        }
        kinds
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
