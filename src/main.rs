//! remote 命令行入口

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use remote_lib::config::{ConfigParser, DEFAULT_CONFIG_FILE};
use remote_lib::launcher::CommandLauncher;
use remote_lib::registry::CommandRegistry;
use remote_lib::server::{AppState, RemoteServer};
use remote_lib::utils::{init_logging, AppResult};

const AFTER_HELP: &str = r#"Configuration File:

  The configuration file contains an array of commands to expose.

  {
    "Commands": [
      {
        "Name": "command_name",
        "Path": "echo",
        "Args": [
          "Hello",
          "Remote"
        ]
      }
    ]
  }

Command Execution:

  Execute commands by sending a GET request to /run.
  http://localhost:5000/run?name=command_name
"#;

#[derive(Parser, Debug)]
#[command(
    name = "remote",
    version,
    about = "Remote exposes an endpoint to run commands on the host machine.",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Host that the server should bind to
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port that the server should bind to
    #[arg(long, default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if init_logging().is_err() {
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = ConfigParser::new(&cli.config).load()?;
    let registry = CommandRegistry::from(config);
    info!(
        "Loaded {} command(s) from {}",
        registry.len(),
        cli.config.display()
    );

    let state = AppState::new(registry, Arc::new(CommandLauncher::new()));
    let address = format!("{}:{}", cli.host, cli.port);
    let server = RemoteServer::bind(&address, state)
        .with_context(|| format!("Could not listen at {}", address))?;
    info!("Remote server listening at http://{}", address);

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, shutting down");
            shutdown.shutdown();
        }
    });

    server.run().await
}
