//! Output formatting for declarations and resolved variables.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use termtree::Tree;

use crate::providers::provider_for_kind;
use crate::resolver::{VariableBinding, bindings_map};
use crate::resource::ResourceSpec;
use crate::template;
use crate::terraform::{Configuration, ProviderRequirement};

pub const BANNER: &str = "Running with inputs:";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Tree,
    Json,
}

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "ADDRESS")]
    address: String,
    #[tabled(rename = "KIND")]
    kind: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ATTRIBUTES")]
    attributes: String,
}

impl From<&ResourceSpec> for ResourceRow {
    fn from(spec: &ResourceSpec) -> Self {
        let attributes = spec
            .attributes
            .iter()
            .map(|(k, v)| format!("{k} = {v}"))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            address: spec.address(),
            kind: spec.kind.clone(),
            name: spec.name.clone(),
            attributes,
        }
    }
}

#[derive(Serialize)]
struct ConfigurationView<'a> {
    required_providers: &'a [ProviderRequirement],
    provider_blocks: &'a [String],
    resources: Vec<&'a ResourceSpec>,
}

pub fn render_configuration(
    config: &Configuration,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(resource_table(config)),
        OutputFormat::Tree => Ok(resource_tree(config).to_string()),
        OutputFormat::Json => configuration_json(config),
    }
}

pub fn resource_table(config: &Configuration) -> String {
    if config.resources.is_empty() {
        return "No resources declared".to_string();
    }
    let rows: Vec<ResourceRow> = config.resources.iter().map(ResourceRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// provider -> kind -> name -> attribute
pub fn resource_tree(config: &Configuration) -> Tree<String> {
    let mut root = Tree::new("resources".to_string());
    let kinds = config.resources.kinds();

    let mut providers: Vec<&str> = Vec::new();
    for kind in &kinds {
        let provider = provider_for_kind(kind);
        if !providers.contains(&provider) {
            providers.push(provider);
        }
    }

    for provider in providers {
        let label = match config.provider(provider) {
            Some(req) => format!("{provider} ({})", req.version),
            None => provider.to_string(),
        };
        let mut provider_node = Tree::new(label);

        for kind in kinds.iter().filter(|k| provider_for_kind(k) == provider) {
            let mut kind_node = Tree::new(kind.to_string());
            for spec in config.resources.iter().filter(|s| s.kind == *kind) {
                let leaves = spec
                    .attributes
                    .iter()
                    .map(|(k, v)| Tree::new(format!("{k} = {v}")));
                kind_node.push(Tree::new(spec.name.clone()).with_leaves(leaves));
            }
            provider_node.push(kind_node);
        }
        root.push(provider_node);
    }
    root
}

pub fn configuration_json(config: &Configuration) -> Result<String, serde_json::Error> {
    let view = ConfigurationView {
        required_providers: &config.required_providers,
        provider_blocks: &config.provider_blocks,
        resources: config.resources.iter().collect(),
    };
    serde_json::to_string_pretty(&view)
}

/// Banner followed by one `KEY: value` line per binding, in binding order.
pub fn binding_lines(bindings: &[VariableBinding]) -> Vec<String> {
    let values = bindings_map(bindings);
    let mut lines = Vec::with_capacity(bindings.len() + 1);
    lines.push(BANNER.to_string());
    for binding in bindings {
        let line = template::render(&format!("{}: ${{{}}}", binding.key, binding.key), &values);
        lines.push(line);
    }
    lines
}
