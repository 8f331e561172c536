use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("invalid seed URL {url:?}: {source}")]
    InvalidInput {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failure to retrieve one page. Never fatal to a crawl.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{url} is not an HTML document ({content_type})")]
    NotHtml { url: String, content_type: String },
}

pub type Result<T> = std::result::Result<T, CrawlError>;
