//! dice-roller MCP server — entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use dice_roller_mcp::config::ServerConfig;
use dice_roller_mcp::context::DiceContext;
use dice_roller_mcp::protocol::ProtocolHandler;
use dice_roller_mcp::resources::ResourceRegistry;
use dice_roller_mcp::tools::ToolRegistry;
use dice_roller_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "dice-roller-mcp",
    about = "MCP server for rolling dice in NdS notation",
    version
)]
struct Cli {
    /// Notation listed as the default dice:// resource.
    #[arg(long, global = true)]
    default_roll: Option<String>,

    /// Maximum number of dice in a single roll.
    #[arg(long, global = true)]
    max_dice: Option<u32>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Start MCP server over HTTP.
    #[cfg(feature = "sse")]
    ServeHttp {
        /// Listen address (host:port).
        #[arg(long, default_value = "127.0.0.1:3100")]
        addr: String,

        /// Bearer token for authentication.
        /// Also reads from DICE_MCP_TOKEN env var.
        #[arg(long)]
        token: Option<String>,
    },

    /// Roll once and print the outcome as JSON.
    Roll {
        /// Dice notation, e.g. 2d6.
        notation: String,
    },

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   dice-roller-mcp completions bash > ~/.local/share/bash-completion/completions/dice-roller-mcp
    ///   dice-roller-mcp completions zsh > ~/.zfunc/_dice-roller-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch interactive REPL mode.
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::resolve(cli.default_roll.as_deref(), cli.max_dice);
    let context = Arc::new(DiceContext::new(config)?);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!("dice-roller MCP server (stdio)");
            let handler = ProtocolHandler::new(context);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        #[cfg(feature = "sse")]
        Commands::ServeHttp { addr, token } => {
            use dice_roller_mcp::transport::SseTransport;

            // Resolve token: CLI flag > env var
            let effective_token = token.or_else(|| std::env::var("DICE_MCP_TOKEN").ok());

            tracing::info!("dice-roller MCP server (http)");
            if effective_token.is_some() {
                tracing::info!("Auth: bearer token required");
            }

            let handler = ProtocolHandler::new(context);
            let transport = SseTransport::with_token(effective_token, handler);
            transport.run(&addr).await?;
        }

        Commands::Roll { notation } => {
            let outcome = context.roll_notation(&notation)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }

        Commands::Info => {
            let capabilities = dice_roller_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let resources = ResourceRegistry::list_resources(&context);
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "resources": resources.iter().map(|r| &r.uri).collect::<Vec<_>>(),
                "max_dice": context.max_dice(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "dice-roller-mcp", &mut std::io::stdout());
        }

        Commands::Repl => {
            dice_roller_mcp::repl::run(&context)?;
        }
    }

    Ok(())
}
