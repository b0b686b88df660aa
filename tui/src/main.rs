use clap::Parser;
use questline_tui::Cli;

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    questline_tui::run_main(cli).await
}
