use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::process::ExitCode;

use sdk_docs_mcp::config::{DocsConfig, Language};
use sdk_docs_mcp::server;

#[derive(Parser, Debug)]
#[command(version, about = "MCP SDK Documentation MCP Server")]
struct Cli {
    /// Type of server to run
    #[arg(short, long, value_enum, default_value_t = ServerType::Stdio)]
    server_type: ServerType,

    /// Address for the SSE server
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    address: String,

    /// URL of the full documentation text
    #[arg(long)]
    docs_url: Option<String>,

    /// README URL override for one language, as LANG=URL
    #[arg(long = "readme-url", value_name = "LANG=URL", value_parser = parse_readme_url)]
    readme_urls: Vec<(Language, String)>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ServerType {
    /// Start an SSE server
    Sse,
    /// Start a stdio server
    Stdio,
}

impl Cli {
    fn docs_config(&self) -> DocsConfig {
        let mut config = DocsConfig::default();
        if let Some(url) = &self.docs_url {
            config = config.with_full_docs_url(url);
        }
        for (language, url) in &self.readme_urls {
            config = config.with_readme_url(*language, url);
        }
        config
    }
}

fn parse_readme_url(s: &str) -> Result<(Language, String)> {
    let (language, url) = s
        .split_once('=')
        .with_context(|| format!("expected LANG=URL, got '{}'", s))?;
    Ok((language.parse()?, url.to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.docs_config();

    let result = match cli.server_type {
        ServerType::Sse => server::start_sse_server(&cli.address, config).await,
        ServerType::Stdio => server::start_stdio_server(config).await,
    };

    // The client connection may not exist yet, so report straight to stderr.
    if let Err(e) = result {
        eprintln!("Failed to start server: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
