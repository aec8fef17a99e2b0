use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tfdemo::output::OutputFormat;
use tfdemo::terraform::DEFAULT_CONFIG_PATH;

/// Without a subcommand, resolves VAR1 and VAR2 from the positional
/// arguments or the environment and prints them.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    args_conflicts_with_subcommands = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub inputs: InputArgs,
}

#[derive(clap::Args, Debug, Default)]
pub struct InputArgs {
    /// Value for VAR1 (falls back to $VAR1)
    #[arg(value_name = "VAR1", allow_hyphen_values = true)]
    pub first: Option<String>,

    /// Value for VAR2 (falls back to $VAR2)
    #[arg(value_name = "VAR2", allow_hyphen_values = true)]
    pub second: Option<String>,
}

impl InputArgs {
    pub fn positional(&self) -> Vec<String> {
        [&self.first, &self.second]
            .into_iter()
            .map(|arg| arg.clone().unwrap_or_default())
            .collect()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the configuration and report what it declares
    Validate(ConfigArgs),
    /// List declared resources
    Show(ShowArgs),
    /// Print the attributes of one resource as JSON
    Get(GetArgs),
    /// Print the plan each provider would produce
    Plan(ConfigArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, env = "TFDEMO_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct GetArgs {
    pub kind: String,
    pub name: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}
