//! WordHippo - robots-aware thesaurus fetching library
//!
//! This crate fetches a single WordHippo thesaurus page on behalf of an
//! automated caller, checks that autonomous retrieval is permitted by the
//! site's robots.txt, and extracts the word-type/definition/synonym
//! entries into LLM-ready text.

mod client;
mod convert;
mod error;
mod extract;
mod robots;
mod tool;
mod types;

pub use convert::{html_to_markdown, is_html, SIMPLIFY_FAILED};
pub use error::FetchError;
pub use extract::Extractor;
pub use robots::{robots_txt_url, strip_comments};
pub use tool::{Tool, ToolBuilder, WORDHIPPO_BASE_URL};
pub use types::{ThesaurusRequest, ThesaurusResponse};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str =
    "ModelContextProtocol/1.0 (Autonomous; +https://github.com/wordhippo-mcp/wordhippo-rs)";

/// Tool description for LLM consumption
pub const TOOL_DESCRIPTION: &str = "Provides a list of similar words from a thesaurus.";

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# Thesaurus Tool

Looks up a word on WordHippo and returns its senses and synonyms.

## Capabilities
- Checks the site's robots.txt before fetching (unless disabled)
- Extracts word-type/definition/synonym entries from the page
- Falls back to readability-style markdown for arbitrary pages
- Passes non-HTML content through verbatim with an explanatory prefix

## Input Parameters
- `word` (required): word that should be looked up in the thesaurus

## Output
One text block per grammatical sense of the word:

```
Adjective: Feeling or showing pleasure or contentment

Synonyms:
- glad
- cheerful

---
```

## Error Handling
- Missing or empty `word` is rejected before any network request
- A robots.txt denial (or a 401/403 on robots.txt itself) aborts the
  lookup; the error carries the policy text so the caller can explain
  the failure to the user
- Network failures and HTTP error statuses abort the lookup
"#;
