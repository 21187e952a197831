use rmcp::ServiceExt;
use rmcp::transport::{sse_server::SseServer, stdio};
use thiserror::Error;
use tracing_subscriber::{self, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigError, DocsConfig};
use crate::logging::LogLevel;
use crate::mcp::DocsServer;

/// Failures that stop the server process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

// stdout carries the protocol, so diagnostics go to stderr
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init();
}

// start sse server
pub async fn start_sse_server(addr: &str, config: DocsConfig) -> Result<(), StartupError> {
    init_tracing();
    config.validate()?;

    tracing::info!("Starting SSE server on {}", addr);
    let ct = SseServer::serve(addr.parse()?)
        .await?
        .with_service(move || DocsServer::new(config.clone()));

    tokio::signal::ctrl_c().await?;
    ct.cancel();
    Ok(())
}

// start stdio server
pub async fn start_stdio_server(config: DocsConfig) -> Result<(), StartupError> {
    init_tracing();
    config.validate()?;

    tracing::info!("Starting MCP server on stdio");

    // Clones share the log sink, which `serve` attaches to the client.
    let server = DocsServer::new(config);
    let service = server
        .clone()
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .map_err(|e| StartupError::Transport(e.into()))?;

    server
        .log(
            LogLevel::Info,
            vec!["MCP SDK docs server connected via stdio and ready.".to_string()],
        )
        .await;
    service.waiting().await?;
    tracing::info!("Client disconnected, shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use mockito::Server;
    use rmcp::model::{CallToolRequestParam, ClientCapabilities, ClientInfo, Implementation};
    use rmcp::transport::SseTransport;

    #[tokio::test]
    async fn test_sse_server() {
        let readme = "# MCP TypeScript SDK\n";
        let mut mock_server = Server::new_async().await;
        let _m = mock_server
            .mock("GET", "/README.md")
            .with_status(200)
            .with_body(readme)
            .create_async()
            .await;
        let config = DocsConfig::default()
            .with_readme_url(Language::TypeScript, format!("{}/README.md", mock_server.url()));

        let addr = "127.0.0.1:18731";
        let server = SseServer::serve(addr.parse().unwrap())
            .await
            .unwrap()
            .with_service(move || DocsServer::new(config.clone()));

        let transport = SseTransport::start(&format!("http://{}/sse", addr)).await.unwrap();

        let client_info = ClientInfo {
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "test sse client".to_string(),
                version: "0.0.1".to_string(),
            },
        };
        let client = client_info.serve(transport).await.inspect_err(|e| {
            println!("client error: {:?}", e);
        }).unwrap();

        let tools = client.list_tools(Default::default()).await.unwrap();
        let names: Vec<_> = tools.tools.iter().map(|t| t.name.to_string()).collect();
        assert!(names.contains(&"get_code_examples".to_string()));
        assert!(names.contains(&"get_readme".to_string()));

        let result = client.call_tool(CallToolRequestParam {
            name: "get_readme".into(),
            arguments: serde_json::json!({
                "language": "typescript",
            }).as_object().cloned(),
        }).await.unwrap();

        server.cancel();

        assert!(result.content.iter().any(|c| c.as_text().unwrap().text == readme));
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let result = start_sse_server("not-an-address", DocsConfig::default()).await;
        assert!(matches!(result, Err(StartupError::Address(_))));
    }

    #[tokio::test]
    async fn test_invalid_config() {
        let config = DocsConfig::default().with_full_docs_url("::nope::");
        let result = start_stdio_server(config).await;
        assert!(matches!(result, Err(StartupError::Config(_))));
    }
}
