use clap::{Parser, Subcommand};
use loyalty::http::{self, config::Config};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "loyalty", version, about = "Café loyalty and ordering service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// Port to listen on (overrides LOYALTY_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Cli::parse();
    let mut config = Config::load();

    if let Some(Commands::Serve { port: Some(port) }) = args.command {
        config.port = port;
    }

    http::start_server(config).await;
}
