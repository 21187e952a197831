//! MCP SDK Documentation Service
//!
//! This crate provides an MCP (Model Context Protocol) server that gives clients
//! access to the MCP documentation and the official SDK READMEs.
//!
//! # Features
//!
//! - Fetch the full MCP documentation and pick out the sections with code
//!   examples for one SDK language
//! - Fetch the README of the TypeScript or Python SDK
//! - Forward server log messages to the connected client
//! - Serve over stdio, or SSE for local debugging
//!
//! # Modules
//!
//! - [`config`]: Supported languages, repository registry and URLs
//! - [`docs_fetcher`]: HTTP retrieval of raw documents
//! - [`extract`]: Markdown sectioning and code-fence filtering
//! - [`logging`]: Client-visible log forwarding
//! - [`mcp`]: MCP tool handlers
//! - [`server`]: Transport setup

pub mod config;
pub mod docs_fetcher;
pub mod extract;
pub mod logging;
pub mod mcp;
pub mod server;
