//! Error types for thesaurus lookups

use thiserror::Error;

/// Errors that can occur during a lookup
#[derive(Debug, Error)]
pub enum FetchError {
    /// Word parameter is missing or empty
    #[error("Missing required parameter: word")]
    MissingWord,

    /// The word produced a malformed target URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Network or transport failure on a fetch
    #[error("Failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP error status on the content fetch
    #[error("Failed to fetch {url} - status code {status}")]
    Status { url: String, status: u16 },

    /// robots.txt forbids autonomous access to the page
    ///
    /// The payload is a pre-formatted diagnostic including the robots.txt
    /// URL, the user-agent, the target URL and the full policy text.
    #[error("{0}")]
    RobotsDenied(String),

    /// Extraction fault caught at the pipeline boundary
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::MissingWord.to_string(),
            "Missing required parameter: word"
        );
        assert_eq!(
            FetchError::InvalidUrl("http://".to_string()).to_string(),
            "Invalid URL: http://"
        );
        assert_eq!(
            FetchError::Status {
                url: "https://example.com/x.html".to_string(),
                status: 503,
            }
            .to_string(),
            "Failed to fetch https://example.com/x.html - status code 503"
        );
    }

    #[test]
    fn test_robots_denied_is_verbatim() {
        let err = FetchError::RobotsDenied("autonomous fetching is not allowed".to_string());
        assert_eq!(err.to_string(), "autonomous fetching is not allowed");
    }
}
