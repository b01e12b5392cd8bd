use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Force a fresh download of the model files
    #[arg(short, long)]
    fresh: bool,

    /// Override the port the HTTP server listens on (default: HTTP_PORT or 5001)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless images)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match centavo::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1)
            }
        }
    }

    centavo::init_logger();
    let args = Args::parse();

    centavo::app::run(args.fresh, args.port)
        .await
        .context("service terminated with an error")
}
