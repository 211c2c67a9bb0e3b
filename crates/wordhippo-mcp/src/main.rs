//! WordHippo MCP server - thesaurus lookups over stdio

mod mcp;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wordhippo::Tool;

/// MCP server exposing a WordHippo thesaurus tool
#[derive(Parser, Debug)]
#[command(name = "wordhippo-mcp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Custom User-Agent string for outbound requests
    #[arg(long)]
    user_agent: Option<String>,

    /// Skip robots.txt compliance checks
    #[arg(long)]
    ignore_robots_txt: bool,

    /// Proxy URL applied to all outbound requests
    #[arg(long)]
    proxy_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP (Model Context Protocol) server over stdio (default)
    Mcp,
    /// Look up a single word and print the result
    Lookup {
        /// Word to look up in the thesaurus
        word: String,
    },
}

#[tokio::main]
async fn main() {
    // stdout carries the JSON-RPC stream, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = Tool::builder().ignore_robots_txt(cli.ignore_robots_txt);
    if let Some(ua) = cli.user_agent {
        builder = builder.user_agent(ua);
    }
    if let Some(proxy) = cli.proxy_url {
        builder = builder.proxy_url(proxy);
    }

    let tool = match builder.build() {
        Ok(tool) => tool,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Lookup { word }) => run_lookup(&tool, &word).await,
        Some(Commands::Mcp) | None => mcp::run_server(tool).await,
    }
}

async fn run_lookup(tool: &Tool, word: &str) {
    match tool.lookup(word).await {
        Ok(response) => println!("{}", response.text()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
