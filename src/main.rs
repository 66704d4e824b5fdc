//! # DocSearch — keyword document search over MCP and HTTP
//!
//! Usage:
//!   docsearch serve                     # HTTP gateway (default 127.0.0.1:3000)
//!   docsearch serve --port 8080         # Custom port
//!   docsearch mcp                       # MCP server on stdin/stdout
//!   docsearch probe                     # Spawn `docsearch mcp` and exercise its tools

use anyhow::Result;
use clap::{Parser, Subcommand};
use docsearch_core::DocSearchConfig;
use docsearch_knowledge::DocumentStore;
use docsearch_mcp::{DocumentTools, McpClient, McpServer, McpServerConfig};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docsearch",
    version,
    about = "🔎 DocSearch — keyword document search over MCP and HTTP"
)]
struct Cli {
    /// Config file path (defaults to $DOCSEARCH_CONFIG or ~/.docsearch/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run the MCP document-search server on stdio
    Mcp,
    /// Spawn the MCP server as a child process and run a scripted session
    Probe,
}

fn config_path(cli: &Cli) -> Option<PathBuf> {
    cli.config
        .clone()
        .or_else(|| std::env::var_os("DOCSEARCH_CONFIG").map(PathBuf::from))
        .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).to_string()))
}

/// Log filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "docsearch=debug,docsearch_knowledge=debug,docsearch_providers=debug,docsearch_mcp=debug,docsearch_gateway=debug,tower_http=debug"
    } else {
        "docsearch=info,docsearch_knowledge=info,docsearch_providers=info,docsearch_mcp=info,docsearch_gateway=info"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout belongs to the JSON-RPC stream in `mcp` mode, so logs always go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = DocSearchConfig::resolve(config_path(&cli).as_deref())?;
    let store = Arc::new(DocumentStore::seeded());

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            println!("🔎 DocSearch v{}", env!("CARGO_PKG_VERSION"));
            docsearch_gateway::start(&config, store).await?;
        }
        Command::Mcp => {
            let tools = DocumentTools::new(store, config.search.default_limit);
            McpServer::new(tools).serve_stdio().await?;
        }
        Command::Probe => probe().await?,
    }

    Ok(())
}

/// Drive our own MCP server through a client, printing each result.
async fn probe() -> Result<()> {
    let exe = std::env::current_exe()?;
    let mut client = McpClient::new(McpServerConfig::new(
        "docsearch",
        &exe.to_string_lossy(),
        &["mcp"],
    ));
    client.connect().await?;

    println!("🧰 Available tools:");
    for tool in client.tools() {
        println!("  - {}: {}", tool.name, tool.description);
        println!("    input: {}", tool.input_schema);
    }

    let calls = [
        (
            "search_documents",
            json!({ "query": "machine learning", "limit": 2 }),
        ),
        (
            "search_documents",
            json!({ "query": "sea shanty wellerman", "limit": 2 }),
        ),
        ("get_all_documents", json!({})),
        ("get_document", json!({ "id": "doc5" })),
    ];

    let mut outcome = Ok(());
    for (name, args) in calls {
        println!("\n▶ {name} {args}");
        match client.call_tool(name, args).await {
            Ok(text) => println!("{text}"),
            Err(e) => {
                outcome = Err(e);
                break;
            }
        }
    }

    client.disconnect().await;
    outcome.map_err(Into::into)
}
