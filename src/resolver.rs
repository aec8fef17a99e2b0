//! Variable resolution from positional arguments and an injected environment.
//!
//! Lookup order for each variable: a non-empty positional argument, then the
//! environment, then the empty string. Absence is never an error.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Source of environment values handed to the resolver.
///
/// The binary snapshots the process environment once and passes it in, so
/// resolution never reads ambient process state.
pub trait EnvLookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl EnvLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvLookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingSource {
    Positional,
    Environment,
    Unset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableBinding {
    pub key: String,
    pub value: String,
    pub source: BindingSource,
}

/// A named variable and the positional slot that can supply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSpec {
    pub key: String,
    pub positional_index: usize,
}

impl VariableSpec {
    pub fn new(key: impl Into<String>, positional_index: usize) -> Self {
        Self {
            key: key.into(),
            positional_index,
        }
    }
}

pub fn resolve<S, E>(positional: &[S], env: &E, key: &str, positional_index: usize) -> String
where
    S: AsRef<str>,
    E: EnvLookup + ?Sized,
{
    resolve_binding(positional, env, &VariableSpec::new(key, positional_index)).value
}

pub fn resolve_binding<S, E>(positional: &[S], env: &E, spec: &VariableSpec) -> VariableBinding
where
    S: AsRef<str>,
    E: EnvLookup + ?Sized,
{
    let arg: Option<&str> = positional
        .get(spec.positional_index)
        .map(|arg| arg.as_ref())
        .filter(|value: &&str| !value.is_empty());

    let (value, source) = match arg {
        Some(value) => (value.to_string(), BindingSource::Positional),
        None => match env.lookup(&spec.key) {
            Some(value) => (value, BindingSource::Environment),
            None => {
                tracing::debug!(key = %spec.key, "variable unresolved, using empty value");
                (String::new(), BindingSource::Unset)
            }
        },
    };

    VariableBinding {
        key: spec.key.clone(),
        value,
        source,
    }
}

pub fn resolve_all<S, E>(specs: &[VariableSpec], positional: &[S], env: &E) -> Vec<VariableBinding>
where
    S: AsRef<str>,
    E: EnvLookup + ?Sized,
{
    specs
        .iter()
        .map(|spec| resolve_binding(positional, env, spec))
        .collect()
}

pub fn bindings_map(bindings: &[VariableBinding]) -> HashMap<String, String> {
    bindings
        .iter()
        .map(|b| (b.key.clone(), b.value.clone()))
        .collect()
}
