/// Document fetching for the extraction pipeline.
///
/// The pipeline never talks to the network directly; it asks a
/// `PageFetcher` for the raw markup behind a URL. This keeps the extraction
/// logic testable against fixture documents.
mod http;

pub use http::HttpPageFetcher;

use thiserror::Error;

/// Errors that can occur while fetching a document. All of them are fatal
/// to a run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A configured header value cannot be sent over HTTP
    #[error("Invalid value for header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The request could not be sent or the body could not be read
    #[error("Request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    /// The server answered with a non-success status
    #[error("HTTP {status} {reason} for {url}")]
    HttpStatus {
        url: String,
        status: u16,
        reason: String,
    },
}

/// Trait for anything that can turn a URL into document text.
pub trait PageFetcher {
    /// Fetches the document at `url` and returns its body as text.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the transport fails or the response status
    /// is not a success.
    fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

