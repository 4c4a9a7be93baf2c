//! RSV CLI - Command line tool for yearly reservoir level statistics.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rsv-cli",
    version,
    about = "Yearly reservoir level statistics toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: rsv_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("[RSV] cli: starting");
    rsv_cmd::run(cli.command).await
}
