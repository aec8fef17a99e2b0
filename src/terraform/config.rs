use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use std::str::FromStr;

use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::resource::{AttributeValue, Attributes, DeclarationSet, ResourceSpec};

pub const DEFAULT_CONFIG_PATH: &str = "main.tf.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderRequirement {
    pub name: String,
    pub source: Option<String>,
    pub version: String,
}

/// A loaded `*.tf.json` document.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    pub required_providers: Vec<ProviderRequirement>,
    /// Provider ids that have a `provider` block, in document order.
    pub provider_blocks: Vec<String>,
    pub resources: DeclarationSet,
}

impl Configuration {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = content.parse()?;
        tracing::info!(
            path = %path.display(),
            resources = config.resources.len(),
            providers = config.required_providers.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderRequirement> {
        self.required_providers.iter().find(|p| p.name == name)
    }
}

impl FromStr for Configuration {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let raw: RawDocument = serde_json::from_str(content)?;
        raw.into_configuration()
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    terraform: Option<RawTerraform>,
    #[serde(default)]
    provider: Blocks<serde_json::Value>,
    #[serde(default)]
    resource: Blocks<Blocks<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct RawTerraform {
    #[serde(default)]
    required_providers: Blocks<RawRequirement>,
}

/// `"dummy": "1.0.0"` shorthand or the `{ source, version }` object form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRequirement {
    Version(String),
    Detailed {
        source: Option<String>,
        version: Option<String>,
    },
}

impl RawDocument {
    fn into_configuration(self) -> Result<Configuration, ConfigError> {
        let mut required_providers: Vec<ProviderRequirement> = Vec::new();
        if let Some(terraform) = self.terraform {
            for (name, requirement) in terraform.required_providers.0 {
                if required_providers.iter().any(|p| p.name == name) {
                    return Err(ConfigError::DuplicateProvider { provider: name });
                }
                let (source, version) = match requirement {
                    RawRequirement::Version(version) => (None, Some(version)),
                    RawRequirement::Detailed { source, version } => (source, version),
                };
                let version = version.ok_or_else(|| ConfigError::MissingVersion {
                    provider: name.clone(),
                })?;
                required_providers.push(ProviderRequirement {
                    name,
                    source,
                    version,
                });
            }
        }

        let provider_blocks = self.provider.0.into_iter().map(|(name, _)| name).collect();

        let mut resources = DeclarationSet::new();
        for (kind, named) in self.resource.0 {
            for (name, body) in named.0 {
                let attributes = convert_attributes(&kind, &name, body)?;
                resources.insert(ResourceSpec::new(kind.clone(), name, attributes))?;
            }
        }

        Ok(Configuration {
            required_providers,
            provider_blocks,
            resources,
        })
    }
}

fn convert_attributes(
    kind: &str,
    name: &str,
    body: serde_json::Value,
) -> Result<Attributes, ConfigError> {
    let address = format!("{kind}.{name}");
    let serde_json::Value::Object(fields) = body else {
        return Err(ConfigError::InvalidResource {
            address,
            message: "resource body must be an object".to_string(),
        });
    };

    let mut attributes = Attributes::new();
    for (key, value) in &fields {
        let converted =
            AttributeValue::from_json(value).ok_or_else(|| ConfigError::UnsupportedAttribute {
                address: address.clone(),
                attribute: key.clone(),
            })?;
        attributes.insert(key.clone(), converted);
    }
    Ok(attributes)
}

/// Keyed blocks in document order, with repeated keys kept.
///
/// Terraform JSON allows a block to be an object or an array of objects; both
/// flatten into one list. Every entry is yielded, so two identical keys stay
/// two entries.
#[derive(Debug)]
struct Blocks<T>(Vec<(String, T)>);

impl<T> Default for Blocks<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, T> Deserialize<'de> for Blocks<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(BlocksVisitor(PhantomData))
    }
}

struct BlocksVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for BlocksVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Blocks<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object or an array of objects")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, T>()? {
            entries.push((key, value));
        }
        Ok(Blocks(entries))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some(Blocks(mut block)) = seq.next_element::<Blocks<T>>()? {
            entries.append(&mut block);
        }
        Ok(Blocks(entries))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Blocks::default())
    }
}
