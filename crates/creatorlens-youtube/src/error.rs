use thiserror::Error;

/// Errors returned by the YouTube Data API client.
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the request with an application-level error message.
    #[error("YouTube API error: {0}")]
    ApiError(String),

    /// Daily quota exhausted. Callers should stop the run rather than retry.
    #[error("YouTube API quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The API key was rejected outright.
    #[error("YouTube API key rejected: {0}")]
    InvalidApiKey(String),

    /// Per-minute request ceiling hit; safe to retry after a pause.
    #[error("rate limited by YouTube API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// No channel matched the roster input under any resolution strategy.
    #[error("no channel found for \"{input}\"")]
    ChannelNotFound { input: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("pagination limit reached for playlist {playlist_id}: exceeded {max_pages} pages")]
    PaginationLimit {
        playlist_id: String,
        max_pages: usize,
    },
}
