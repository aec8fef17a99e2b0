mod cli;

use std::collections::HashMap;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use tfdemo::output::{binding_lines, render_configuration};
use tfdemo::{Configuration, TfError, VariableSpec, providers, resolve_all};

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // NOTE: snapshot once; non-UTF-8 entries cannot be variable values
    let env: HashMap<String, String> = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();

    run(cli, &env)?;
    Ok(())
}

fn run(cli: Cli, env: &HashMap<String, String>) -> Result<(), TfError> {
    match cli.command {
        None => {
            let specs = [VariableSpec::new("VAR1", 0), VariableSpec::new("VAR2", 1)];
            let bindings = resolve_all(&specs, &cli.inputs.positional(), env);
            for line in binding_lines(&bindings) {
                println!("{line}");
            }
        }
        Some(Command::Validate(args)) => {
            let config = Configuration::from_file(&args.config)?;
            let blocks = if config.provider_blocks.is_empty() {
                "none".to_string()
            } else {
                config.provider_blocks.join(", ")
            };
            println!(
                "{} is valid: {} resource(s), {} required provider(s), provider blocks: {}",
                args.config.display(),
                config.resources.len(),
                config.required_providers.len(),
                blocks
            );
        }
        Some(Command::Show(args)) => {
            let config = Configuration::from_file(&args.config.config)?;
            println!("{}", render_configuration(&config, args.format)?);
        }
        Some(Command::Get(args)) => {
            let config = Configuration::from_file(&args.config.config)?;
            let attributes = config.resources.lookup(&args.kind, &args.name)?;
            println!("{}", serde_json::to_string_pretty(attributes)?);
        }
        Some(Command::Plan(args)) => {
            let config = Configuration::from_file(&args.config)?;
            let entries = providers::plan(&config)?;
            for entry in &entries {
                println!("{entry}\n");
            }
            println!(
                "Plan: {} to add, 0 to change, 0 to destroy.",
                entries.len()
            );
        }
    }

    Ok(())
}
