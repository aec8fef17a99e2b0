use super::Provider;
use crate::resource::ResourceSpec;

/// The demonstration provider declared by the sample configuration.
pub struct DummyProvider;

impl Provider for DummyProvider {
    fn name(&self) -> &str {
        "dummy"
    }

    fn resource_types(&self) -> Vec<&str> {
        vec!["dummy_server", "dummy_database"]
    }

    fn plan_entry(&self, resource: &ResourceSpec) -> String {
        let width = resource
            .attributes
            .keys()
            .map(|k| k.len())
            .max()
            .unwrap_or(0);

        let mut out = format!(
            "  # {} will be created\n  + resource \"{}\" \"{}\" {{\n",
            resource.address(),
            resource.kind,
            resource.name
        );
        for (key, value) in &resource.attributes {
            out.push_str(&format!("      + {key:<width$} = {value}\n"));
        }
        out.push_str("    }");
        out
    }
}
