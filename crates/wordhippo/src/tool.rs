//! Tool builder and lookup pipeline
//!
//! The pipeline for one invocation is linear: robots.txt compliance
//! check (unless disabled), content fetch, classification, extraction.
//! The compliance check always completes before the content fetch
//! starts; a denial means the content endpoint is never contacted.

use crate::client;
use crate::convert;
use crate::error::FetchError;
use crate::extract::Extractor;
use crate::robots;
use crate::types::{ThesaurusRequest, ThesaurusResponse};
use crate::{DEFAULT_USER_AGENT, TOOL_DESCRIPTION, TOOL_LLMTXT};
use schemars::schema_for;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::debug;
use url::Url;

/// Host the lookup URL template points at
pub const WORDHIPPO_BASE_URL: &str = "https://www.wordhippo.com";

/// Builder for configuring the thesaurus tool
#[derive(Debug, Clone, Default)]
pub struct ToolBuilder {
    user_agent: Option<String>,
    ignore_robots_txt: bool,
    proxy_url: Option<String>,
    extractor: Extractor,
    base_url: Option<String>,
}

impl ToolBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Skip robots.txt compliance checks entirely
    pub fn ignore_robots_txt(mut self, ignore: bool) -> Self {
        self.ignore_robots_txt = ignore;
        self
    }

    /// Route all requests through a proxy
    pub fn proxy_url(mut self, proxy: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy.into());
        self
    }

    /// Select the extraction strategy
    pub fn extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Override the thesaurus base URL (used by tests)
    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = Some(base.into());
        self
    }

    /// Build the tool, constructing the shared HTTP client
    pub fn build(self) -> Result<Tool, FetchError> {
        let user_agent = self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let client = client::build_client(&user_agent, self.proxy_url.as_deref())?;
        Ok(Tool {
            user_agent,
            ignore_robots_txt: self.ignore_robots_txt,
            extractor: self.extractor,
            base_url: self
                .base_url
                .unwrap_or_else(|| WORDHIPPO_BASE_URL.to_string()),
            client,
        })
    }
}

/// Configured thesaurus tool
///
/// Holds the immutable identity and proxy configuration plus one shared
/// HTTP client. Invocations are independent; nothing is cached between
/// them beyond the client's connection pool.
#[derive(Debug, Clone)]
pub struct Tool {
    user_agent: String,
    ignore_robots_txt: bool,
    extractor: Extractor,
    base_url: String,
    client: reqwest::Client,
}

impl Tool {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// Get tool description
    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    /// Get input schema as JSON
    pub fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ThesaurusRequest);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Build the thesaurus page URL for a word
    pub fn page_url(&self, word: &str) -> Result<Url, FetchError> {
        let raw = format!(
            "{}/what-is/another-word-for/{word}.html",
            self.base_url.trim_end_matches('/')
        );
        Url::parse(&raw).map_err(|_| FetchError::InvalidUrl(raw))
    }

    /// Look up a word and return the extracted page content
    pub async fn lookup(&self, word: &str) -> Result<ThesaurusResponse, FetchError> {
        if word.is_empty() {
            return Err(FetchError::MissingWord);
        }

        let url = self.page_url(word)?;
        debug!(word, %url, "starting lookup");

        if !self.ignore_robots_txt {
            robots::check_may_fetch(&self.client, &url, &self.user_agent).await?;
        }

        let page = client::fetch_page(&self.client, &url).await?;

        let (content, prefix) = if convert::is_html(&page.content_type, &page.body) {
            // HTML parsing runs on untrusted input; a panic there must
            // surface as a structured error, not tear down the caller.
            let extractor = self.extractor;
            let body = page.body;
            let extracted = catch_unwind(AssertUnwindSafe(|| extractor.extract(&body, &url)))
                .map_err(|_| {
                    FetchError::Internal(format!("extraction panicked while processing {url}"))
                })?;
            (extracted, None)
        } else {
            (
                page.body,
                Some(format!(
                    "Content type {} cannot be simplified to markdown, but here is the raw \
                     content:\n",
                    page.content_type
                )),
            )
        };

        Ok(ThesaurusResponse {
            word: word.to_string(),
            url: url.to_string(),
            status_code: page.status_code,
            content,
            prefix,
        })
    }

    /// Look up via a request struct (MCP entry point)
    pub async fn execute(&self, req: ThesaurusRequest) -> Result<ThesaurusResponse, FetchError> {
        self.lookup(&req.word).await
    }
}
