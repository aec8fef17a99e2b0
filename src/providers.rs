pub mod dummy;

use thiserror::Error;

use crate::resource::ResourceSpec;
use crate::terraform::Configuration;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("provider {provider} does not support resource type {kind}")]
    UnsupportedResource { provider: String, kind: String },
}

/// Describes what a provider would do with a declared resource.
///
/// Providers never provision anything; planning is pure text.
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;
    fn resource_types(&self) -> Vec<&str>;
    fn plan_entry(&self, resource: &ResourceSpec) -> String;
}

pub fn get_provider(name: &str) -> Result<Box<dyn Provider>, ProviderError> {
    match name {
        "dummy" => Ok(Box::new(dummy::DummyProvider)),
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}

/// Provider id implied by a resource kind: the text before the first `_`.
pub fn provider_for_kind(kind: &str) -> &str {
    kind.split_once('_').map_or(kind, |(prefix, _)| prefix)
}

/// Plan entries for every declared resource, in declaration order.
pub fn plan(config: &Configuration) -> Result<Vec<String>, ProviderError> {
    let mut entries = Vec::with_capacity(config.resources.len());

    for resource in config.resources.iter() {
        let provider_name = provider_for_kind(&resource.kind);
        if config.provider(provider_name).is_none() {
            tracing::warn!(
                provider = provider_name,
                address = %resource.address(),
                "provider not listed in required_providers"
            );
        }

        let provider = get_provider(provider_name)?;
        if !provider.resource_types().contains(&resource.kind.as_str()) {
            return Err(ProviderError::UnsupportedResource {
                provider: provider.name().to_string(),
                kind: resource.kind.clone(),
            });
        }
        entries.push(provider.plan_entry(resource));
    }

    tracing::info!(count = entries.len(), "plan complete");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Attributes;

    #[test]
    fn test_get_provider_dummy() {
        let provider = get_provider("dummy").unwrap();
        assert_eq!(provider.name(), "dummy");
    }

    #[test]
    fn test_get_provider_unknown() {
        let result = get_provider("aws");
        match result {
            Err(ProviderError::UnknownProvider(name)) => assert_eq!(name, "aws"),
            _ => panic!("expected UnknownProvider error"),
        }
    }

    #[test]
    fn test_provider_for_kind() {
        assert_eq!(provider_for_kind("dummy_server"), "dummy");
        assert_eq!(provider_for_kind("dummy_database_replica"), "dummy");
        assert_eq!(provider_for_kind("standalone"), "standalone");
    }

    #[test]
    fn test_plan_sample() {
        let config: Configuration = r#"{
            "terraform": { "required_providers": { "dummy": { "version": "1.0.0" } } },
            "resource": {
                "dummy_server": { "web": { "name": "web-01" } },
                "dummy_database": { "db": {} }
            }
        }"#
        .parse()
        .unwrap();

        let entries = plan(&config).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("resource \"dummy_server\" \"web\""));
        assert!(entries[1].contains("dummy_database.db will be created"));
    }

    #[test]
    fn test_plan_unsupported_kind() {
        let config: Configuration = r#"{ "resource": { "dummy_queue": { "q": {} } } }"#
            .parse()
            .unwrap();
        let err = plan(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "provider dummy does not support resource type dummy_queue"
        );
    }

    #[test]
    fn test_plan_unknown_provider() {
        let mut config = Configuration::default();
        config
            .resources
            .insert(ResourceSpec::new("aws_instance", "web", Attributes::new()))
            .unwrap();
        assert!(matches!(
            plan(&config),
            Err(ProviderError::UnknownProvider(ref name)) if name == "aws"
        ));
    }
}
