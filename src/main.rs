use anyhow::Result;
use clap::Parser;

use cb_infra::DirsAppDirsAdapter;
use coffeebrew_lib::bootstrap;
use coffeebrew_lib::cli::{self, Cli, Session};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal outside development.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config =
        bootstrap::resolve_config(cli.config, cli.data_dir, &DirsAppDirsAdapter::new())?;
    bootstrap::init_tracing_subscriber(Some(&bootstrap::logs_dir(&config)))?;

    let session = Session::new(bootstrap::wire_app(&config));
    cli::run(&session, cli.command).await
}
