use adna_viewer::cli::{run, Cli};
use anyhow::Context;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.name();
    run(cli)
        .await
        .with_context(|| format!("adna-viewer {} failed", command))
}
