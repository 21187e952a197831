//! Spawns the server over stdio and prints what its tools return.
//!
//! Run with `cargo run --example client -- [typescript|python]` after building
//! the server binary.

use anyhow::Result;
use rmcp::model::CallToolRequestParam;
use rmcp::{ServiceExt, transport::TokioChildProcess};
use serde_json::json;
use tokio::process::Command;

#[tokio::main]
async fn main() -> Result<()> {
    let language = std::env::args().nth(1).unwrap_or_else(|| "typescript".to_string());

    let transport = TokioChildProcess::new(
        Command::new("cargo").args(["run", "--quiet", "--bin", "sdk-docs-mcp"]),
    )?;
    let client = ().serve(transport).await?;

    let tools = client.list_tools(Default::default()).await?;
    for tool in &tools.tools {
        println!("Tool: {}", tool.name);
    }

    println!("\nQuerying {} code examples...", language);
    let result = client
        .call_tool(CallToolRequestParam {
            name: "get_code_examples".into(),
            arguments: json!({ "language": language }).as_object().cloned(),
        })
        .await?;
    if let Some(text) = result.content.first().and_then(|c| c.as_text()) {
        let sections: Vec<String> = serde_json::from_str(&text.text)?;
        println!("Found {} sections", sections.len());
        if let Some(first) = sections.first() {
            println!("First section preview: {}...", preview(first));
        }
    }

    println!("\nQuerying {} README...", language);
    let result = client
        .call_tool(CallToolRequestParam {
            name: "get_readme".into(),
            arguments: json!({ "language": language }).as_object().cloned(),
        })
        .await?;
    if let Some(text) = result.content.first().and_then(|c| c.as_text()) {
        println!("README preview: {}...", preview(&text.text));
    }

    client.cancel().await?;
    Ok(())
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
