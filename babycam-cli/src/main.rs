use anyhow::{Context, Result};
use babycam::server::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig, parse_ice_servers, serve};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "babycam", version, about = "Signaling server for host-to-viewer camera rooms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling server.
    Serve(ServeArgs),
}

#[derive(clap::Args)]
struct ServeArgs {
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Externally reachable origin used in share links.
    #[arg(long, env = "PUBLIC_BASE_URL")]
    public_base_url: Option<String>,

    /// JSON list of ICE servers, e.g. '[{"urls":["stun:stun.l.google.com:19302"]}]'.
    #[arg(long, env = "ICE_SERVERS")]
    ice_servers: Option<String>,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            public_base_url: self
                .public_base_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            ice_servers: parse_ice_servers(self.ice_servers.as_deref()),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_banner(config: &ServerConfig) {
    let origin = config.primary_origin();

    println!("{} {}", "📷 BabyCam running at".green().bold(), origin);
    for lan in config.lan_origins() {
        println!("   LAN: {}", lan);
    }

    println!("\n{}", "Host UI:".cyan());
    println!("   {}/host", origin);
    println!("{}", "Viewer URL (local):".cyan());
    println!("   {}/watch", origin);
    println!("{}", "Viewer URL (internet, secure mode):".cyan());
    println!("   {}/watch/my-baby-room?key=your-key", origin);
    println!(
        "\n{}",
        "Tip: use HTTPS and a TURN server for stable remote connections.".dimmed()
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let config = args.into_config();
            info!(
                "Resolved config: bind {}, public URL {}, {} ICE servers",
                config.bind_addr(),
                config.public_base_url.as_deref().unwrap_or("unset"),
                config.ice_servers.len()
            );
            print_banner(&config);

            serve(config).await.context("Signaling server failed")?;
        }
    }

    Ok(())
}
