use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog", about = "Product catalog service", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = catalog_kernel::settings::Settings::load()
        .with_context(|| "failed to load catalog settings")?;

    catalog_telemetry::init(&settings.telemetry)?;

    tracing::info!(env = ?settings.environment, "starting catalog service");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => catalog_app::run(settings).await,
    }
}
