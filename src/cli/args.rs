/// CLI argument definitions via clap derive.
use clap::{Parser, ValueEnum};

/// routerha — report which Neutron L3 agents host each router and their HA state.
#[derive(Debug, Parser)]
#[command(
    name = "routerha",
    about = "Report which Neutron L3 agents host each OpenStack router and their HA state",
    version
)]
pub struct Cli {
    /// Output format. Defaults to `table` when table rendering is compiled
    /// in, `json` otherwise.
    #[arg(value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Print API call timing to stderr for debugging.
    #[arg(long)]
    pub debug: bool,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered ASCII table, one row per router, agents as embedded YAML.
    Table,
    /// Compact single-line JSON array.
    Json,
    /// Block-style YAML.
    Yaml,
    /// Same as `yaml`.
    Yml,
}
