// Main binary for the palisade fencing agent: assemble the request from
// the command line or the Pacemaker stdin protocol, load the node table,
// and hand the validated request to the dispatcher. The exit code is the
// only result the cluster manager sees.

mod metadata;
mod request;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

use std::io::{self, stderr};

use palisade_bmc::{IpmiConfig, IpmiTool};
use palisade_common::nodelist;
use palisade_dispatch::Dispatcher;

use request::{AgentOp, RawRequest};

// Define the command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "IPMI fencing agent for Pacemaker clusters", long_about = None)]
struct Cli {
    /// BMC login name
    #[arg(short = 'U', long)]
    user: Option<String>,

    /// BMC login password
    #[arg(short = 'P', long)]
    pass: Option<String>,

    /// Node to act on, by its name in the node list
    #[arg(short = 'H', long)]
    bmc: Option<String>,

    /// UDP port of the BMC IPMI interface
    #[arg(short = 'p', long)]
    port: Option<String>,

    /// Node list file mapping BMC addresses to node names
    #[arg(short = 'n', long)]
    nodelist: Option<String>,

    /// Echo the resolved options and the node table to stdout
    #[arg(short, long, default_value_t = false)]
    echo: bool,

    /// Verbose output - shows debug-level logs
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Fencing action: on, off, reboot, soft, status, monitor, metadata, start, stop
    action: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Logging goes to stderr only; stdout is reserved for protocol
    // output (metadata document, echo mode). RUST_LOG overrides the
    // default directives when set.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let default_directives = format!(
        "palisade={level},palisade_common={level},palisade_bmc={level},palisade_dispatch={level}",
        level = default_level
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    registry()
        .with(filter)
        .with(fmt::layer().with_writer(stderr))
        .init();

    let from_cli = RawRequest {
        action: cli.action.clone(),
        user: cli.user.clone(),
        pass: cli.pass.clone(),
        port: cli.port.clone(),
        nodelist: cli.nodelist.clone(),
        target: cli.bmc.clone(),
    };

    // Pacemaker drives fence agents over stdin; fall back to that
    // protocol when the command line carries no request at all.
    let raw = if from_cli.is_set() {
        from_cli
    } else {
        RawRequest::from_reader(io::stdin().lock())?
    };
    let resolved = raw.resolve();

    if cli.echo {
        request::echo_args(&resolved);
    }

    let Some(op) = request::plan(&resolved) else {
        error!("unsupported action: {}", resolved.action);
        std::process::exit(1);
    };

    let fence = match op {
        AgentOp::Metadata => {
            print!("{}", metadata::DOCUMENT);
            return Ok(());
        }
        AgentOp::Lifecycle => {
            debug!(action = %resolved.action, "lifecycle action is a no-op");
            return Ok(());
        }
        AgentOp::Fence(fence) => fence,
    };

    let table = match nodelist::load(&resolved.nodelist) {
        Ok(table) => table,
        Err(err) => {
            error!("{err}");
            std::process::exit(4);
        }
    };
    if cli.echo {
        request::echo_nodes(&table);
    }

    let config =
        IpmiConfig::new(fence.user.as_str(), fence.pass.as_str()).with_port(fence.port.as_str());
    let dispatcher = Dispatcher::new(IpmiTool::new(config));

    match dispatcher.dispatch(&fence, &table).await {
        Ok(result) => {
            if !result.overall_success {
                let failed: Vec<&str> = result.failed_nodes.iter().map(String::as_str).collect();
                error!("fencing failed for: {}", failed.join(", "));
            }
            std::process::exit(result.exit_code());
        }
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}
