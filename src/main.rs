//! tfc-dispatch - Main entry point

use log::debug;

use tfc_dispatch::{run_dispatch_command, Cli, Config, Invocation, TfeClient};

#[tokio::main]
async fn main() {
    let invocation = Cli::parse_invocation();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&invocation.cli.log_level),
    )
    .init();

    if let Err(e) = run(&invocation).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(invocation: &Invocation) -> Result<(), Box<dyn std::error::Error>> {
    debug!(
        "Starting tfc-dispatch v{}: target={}, pattern={}",
        env!("CARGO_PKG_VERSION"),
        invocation.target.name,
        invocation.pattern
    );

    let config = Config::from_env()?;
    debug!(
        "Config: org={}, address={}, retry_server_errors={}",
        config.organization, config.address, config.retry_server_errors
    );

    let client = TfeClient::new(&config)?;

    run_dispatch_command(&client, &config, &invocation.pattern).await?;

    Ok(())
}
