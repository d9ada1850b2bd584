use anyhow::Result;
use clap::Parser;
use log::info;
use tokio::runtime::Builder;

use sdn_pce::config::ServerConfig;
use sdn_pce::server::ComputeServer;

#[derive(Parser)]
#[command(name = "sdn_pce", version, about = "Shortest-path computation engine for OpenFlow network topologies")]
struct Cli {
    /// Address to listen on
    #[arg(long)]
    listen: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.bind_address = listen;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    info!("starting on {}", config.socket_addr());

    let rt = Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let server = ComputeServer::bind(&config.socket_addr()).await?;
        server.serve().await
    })
}
