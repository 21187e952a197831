//! MCP tool handlers for the SDK documentation server.
//!
//! # Tools
//!
//! - `get_code_examples`: sections of the full MCP documentation that contain
//!   code in the requested language, as a JSON array of strings.
//! - `get_readme`: the raw README of the requested language's SDK.
//!
//! # Example
//! ```no_run
//! use rmcp::{ServiceExt, transport::stdio};
//! use sdk_docs_mcp::config::DocsConfig;
//! use sdk_docs_mcp::mcp::DocsServer;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let service = DocsServer::new(DocsConfig::default()).serve(stdio()).await?;
//!     service.waiting().await?;
//!     Ok(())
//! }
//! ```

use rmcp::model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities};
use rmcp::service::Peer;
use rmcp::{Error as McpError, RoleServer, ServerHandler, model::ServerInfo, schemars, tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{DocsConfig, Language};
use crate::docs_fetcher::{DocsClient, FetchError};
use crate::extract::extract_examples;
use crate::logging::{LogLevel, LogSink, PeerLogSink, log_item};

#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CodeExamplesParams {
    #[schemars(description = "SDK language of the code examples. Defaults to typescript.")]
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ReadmeParams {
    #[schemars(description = "SDK language whose README should be returned")]
    pub language: Language,
}

#[derive(Debug, Error)]
enum ToolError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to encode sections: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serves MCP SDK documentation to one connected client.
///
/// Tool calls share no mutable state and may run concurrently.
#[derive(Clone)]
pub struct DocsServer {
    config: Arc<DocsConfig>,
    client: DocsClient,
    peer_sink: PeerLogSink,
    sink: Arc<dyn LogSink>,
}

#[tool(tool_box)]
impl DocsServer {
    /// Creates a server that forwards its log messages to the connected client.
    pub fn new(config: DocsConfig) -> Self {
        let peer_sink = PeerLogSink::new();
        Self {
            config: Arc::new(config),
            client: DocsClient::new(),
            sink: Arc::new(peer_sink.clone()),
            peer_sink,
        }
    }

    /// Replaces where client-visible log messages go.
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Logs to tracing and to the client, if one is connected.
    pub async fn log(&self, level: LogLevel, items: Vec<String>) {
        match level {
            LogLevel::Info => tracing::info!("{}", items.join(" ")),
            LogLevel::Error => tracing::error!("{}", items.join(" ")),
        }
        self.sink.log(level, items).await;
    }

    async fn fail(&self, tool: &str, language: Language, err: ToolError) -> McpError {
        self.log(
            LogLevel::Error,
            vec![format!("Error in {} tool (language: {}): {}", tool, language, err)],
        )
        .await;
        McpError::internal_error(format!("Error executing {}: {}", tool, err), None)
    }

    async fn code_examples(&self, language: Language) -> Result<String, ToolError> {
        let docs = self.client.fetch(&self.config.full_docs_url).await?;
        let sections = extract_examples(&docs, language);
        self.log(
            LogLevel::Info,
            vec![format!("Found {} sections with {} code examples", sections.len(), language)],
        )
        .await;
        Ok(serde_json::to_string(&sections)?)
    }

    #[tool(description = "Get the sections of the MCP documentation that contain code examples \
        in the given SDK language. Returns a JSON array of markdown sections.")]
    async fn get_code_examples(
        &self,
        #[tool(aggr)] params: CodeExamplesParams,
    ) -> Result<CallToolResult, McpError> {
        let language = params.language.unwrap_or_default();
        self.log(
            LogLevel::Info,
            vec![
                "Executing get_code_examples with params:".to_string(),
                log_item(&serde_json::json!({ "language": language })),
            ],
        )
        .await;

        match self.code_examples(language).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(err) => Err(self.fail("get_code_examples", language, err).await),
        }
    }

    #[tool(description = "Get the README of the MCP SDK for the given language")]
    async fn get_readme(
        &self,
        #[tool(aggr)] params: ReadmeParams,
    ) -> Result<CallToolResult, McpError> {
        let language = params.language;
        let url = self.config.readme_url(language);
        self.log(
            LogLevel::Info,
            vec![format!("Fetching {} SDK README from {}", language, url)],
        )
        .await;

        match self.client.fetch(url).await {
            Ok(readme) => {
                self.log(
                    LogLevel::Info,
                    vec![format!("Fetched {} bytes of {} SDK README", readme.len(), language)],
                )
                .await;
                Ok(CallToolResult::success(vec![Content::text(readme)]))
            }
            Err(err) => Err(self.fail("get_readme", language, err.into()).await),
        }
    }
}

#[tool(tool_box)]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder()
                .enable_logging()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "This server provides documentation for the MCP SDKs (typescript, python). \
                Use 'get_code_examples' to retrieve documentation sections containing code \
                examples for a language, and 'get_readme' to retrieve the README of an SDK."
                    .to_string(),
            ),
        }
    }

    fn get_peer(&self) -> Option<Peer<RoleServer>> {
        self.peer_sink.peer()
    }

    fn set_peer(&mut self, peer: Peer<RoleServer>) {
        self.peer_sink.attach(peer);
    }
}
