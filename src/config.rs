//! Supported SDK languages, their repositories, and the documentation URLs
//! the server reads from.

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Full MCP documentation in a single plain-text file.
pub const FULL_DOCS_URL: &str = "https://modelcontextprotocol.io/llms-full.txt";

/// Source repository of one SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repository {
    pub repo_url: &'static str,
    pub readme_url: &'static str,
}

const TYPESCRIPT_SDK: Repository = Repository {
    repo_url: "https://github.com/modelcontextprotocol/typescript-sdk",
    readme_url: "https://raw.githubusercontent.com/modelcontextprotocol/typescript-sdk/refs/heads/main/README.md",
};

const PYTHON_SDK: Repository = Repository {
    repo_url: "https://github.com/modelcontextprotocol/python-sdk",
    readme_url: "https://raw.githubusercontent.com/modelcontextprotocol/python-sdk/refs/heads/main/README.md",
};

/// Languages with an official SDK. Anything else is rejected when the tool
/// arguments are deserialized.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    TypeScript,
    Python,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::TypeScript, Language::Python];

    /// Token used after the opening backticks of a fenced code block.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Python => "python",
        }
    }

    pub fn repository(&self) -> &'static Repository {
        match self {
            Language::TypeScript => &TYPESCRIPT_SDK,
            Language::Python => &PYTHON_SDK,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported language '{0}', expected one of: typescript, python")]
    UnknownLanguage(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownLanguage(s.to_string()))
    }
}

/// Where documents are fetched from at runtime.
///
/// Defaults to the public URLs; individual entries can be pointed at a mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    pub full_docs_url: String,
    readme_overrides: BTreeMap<Language, String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            full_docs_url: FULL_DOCS_URL.to_string(),
            readme_overrides: BTreeMap::new(),
        }
    }
}

impl DocsConfig {
    pub fn with_full_docs_url(mut self, url: impl Into<String>) -> Self {
        self.full_docs_url = url.into();
        self
    }

    pub fn with_readme_url(mut self, language: Language, url: impl Into<String>) -> Self {
        self.readme_overrides.insert(language, url.into());
        self
    }

    pub fn readme_url(&self, language: Language) -> &str {
        self.readme_overrides
            .get(&language)
            .map(String::as_str)
            .unwrap_or(language.repository().readme_url)
    }

    /// Checks that every configured URL parses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let readme_urls = Language::ALL.iter().map(|lang| self.readme_url(*lang));
        for url in std::iter::once(self.full_docs_url.as_str()).chain(readme_urls) {
            Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}
