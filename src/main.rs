use clap::Parser;

use fund_yield::api::{Cli, run_cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run_cli(cli).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
