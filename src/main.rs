// ABOUTME: CLI entrypoint for deploy-export command
// ABOUTME: Sets up logging, builds config, maps fatal errors to exit codes

use clap::Parser;
use deploy_export::{
    api::ApiClient, auth::resolve_token, cli::Cli, export::export_deployment,
    progress::ProgressObserver, Result,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("deploy-export: [E{}] {}", e.exit_code(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let token = resolve_token(cli.token.clone())?;
    let config = cli.into_config(token);
    config.validate()?;

    let client = ApiClient::new(config.token.clone(), Some(config.api_base.clone()))?
        .with_team_slug(config.team_slug.clone());

    let mut observer = ProgressObserver::new();
    export_deployment(&client, &config, &mut observer)?;

    Ok(())
}
