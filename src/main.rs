use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use research_agent::{config::Config, routes::create_router, AppState, Orchestrator};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "research-agent", version, about = "Iterative web research assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Override the PORT setting
        #[arg(long)]
        port: Option<u16>,
    },
    /// Research a topic once and print the report
    Research {
        topic: String,
        /// Override RESEARCH_MAX_LOOPS
        #[arg(long)]
        max_loops: Option<u32>,
        /// Print the report as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    research_agent::utils::init_logger();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Command::Research { topic, max_loops, json } => {
            if let Some(max_loops) = max_loops {
                config.research.max_loops = max_loops;
            }
            let topic = topic.trim();
            if topic.is_empty() {
                anyhow::bail!("Topic required");
            }

            let orchestrator = Orchestrator::from_config(&config)?;
            let report = orchestrator.run(topic).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.summary);
            }
            Ok(())
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Configuration loaded: {:?}", config.server);

    let orchestrator = Orchestrator::from_config(&config)?;

    // Create shared state
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        config: config.clone(),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
