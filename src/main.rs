#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! routerha — report which Neutron L3 agents host each router and their HA state.

mod cli;
mod neutron;
mod report;
mod types;

use clap::Parser;

use cli::{Cli, DebugTimer, OutputFormat, render, resolve_format, table_supported, write_error};
use neutron::HttpNetworkClient;
use report::ReportError;
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();
    let format = resolve_format(cli.format);

    match run(&cli, format) {
        Ok(()) => {}
        Err(err) => {
            let error_output = ErrorOutput::from_report_error(&err);
            write_error(&error_output, format);
            std::process::exit(err.exit_code());
        }
    }
}

/// Run the fetch-then-format pipeline: authenticate, enumerate routers,
/// resolve hosting agents, aggregate, render to stdout.
fn run(cli: &Cli, format: OutputFormat) -> Result<(), ReportError> {
    // Reject an impossible presentation before touching the network.
    if format == OutputFormat::Table && !table_supported() {
        return Err(ReportError::TableUnavailable);
    }

    let _t_auth = DebugTimer::new("authenticate", cli.debug);
    let client = HttpNetworkClient::from_env()?;
    drop(_t_auth);

    let _t_collect = DebugTimer::new("collect_reports", cli.debug);
    let reports = report::collect(&client)?;
    drop(_t_collect);

    println!("{}", render(&reports, format)?);
    Ok(())
}
