//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with API-key management, typed deserialization, quota
//! accounting and retry. Channel resolution prefers the 1-unit
//! `channels.list` filters and only falls back to `search.list` (100 units)
//! when nothing cheaper can interpret the input.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use creatorlens_core::{AppConfig, ChannelProfile, QuotaSnapshot};

use crate::error::YouTubeError;
use crate::normalize::normalize_channel;
use crate::quota::{QuotaLedger, LIST_COST, SEARCH_COST};
use crate::resolve::{classify_input, ChannelQuery, ResolutionCache};
use crate::retry::retry_with_backoff;
use crate::types::{
    ApiErrorEnvelope, ChannelIdItem, ChannelItem, ListResponse, PlaylistItem, SearchItem,
    VideoItem,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Hard cap on playlist pages per channel. At 50 entries per page this
/// covers 2,500 uploads, far beyond any sensible `max_videos` setting.
const MAX_PAGES: usize = 50;

/// `playlistItems.list` page ceiling and `videos.list` ID batch size.
const PAGE_SIZE: usize = 50;

/// Reported in [`YouTubeError::RateLimited`] when the response carries no
/// usable `Retry-After`; the actual sleep schedule lives in [`crate::retry`].
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Client for the YouTube Data API v3.
///
/// Manages the HTTP client, API key, base URL, retry policy and the quota
/// ledger. Use [`YouTubeClient::new`] for production or
/// [`YouTubeClient::with_base_url`] to point at a mock server in tests.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
    quota: QuotaLedger,
}

impl YouTubeClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, YouTubeError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YouTubeError::ApiError`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> Result<Self, YouTubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // endpoint segments append rather than replace the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YouTubeError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url,
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
            quota: QuotaLedger::default(),
        })
    }

    /// Quota spent by this client so far.
    #[must_use]
    pub fn quota_snapshot(&self) -> QuotaSnapshot {
        self.quota.snapshot()
    }

    /// Resolves any roster input to a canonical `UC…` channel ID, consulting
    /// `cache` first and recording the answer on success.
    ///
    /// Handle and legacy-username lookups that come back empty fall through
    /// to a search on the bare name before giving up.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::ChannelNotFound`] when no strategy finds a channel.
    /// - Any transport, quota or deserialization error from the API calls.
    pub async fn resolve_channel(
        &self,
        input: &str,
        cache: &mut ResolutionCache,
    ) -> Result<String, YouTubeError> {
        if let Some(hit) = cache.get(input) {
            tracing::debug!(input, channel_id = hit, "resolution cache hit");
            return Ok(hit.to_owned());
        }

        let channel_id = match classify_input(input) {
            ChannelQuery::Id(id) => id,
            ChannelQuery::Handle(handle) => {
                match self.lookup_channel_id(("forHandle", handle.as_str())).await? {
                    Some(id) => id,
                    None => {
                        tracing::debug!(input, "handle lookup missed, falling back to search");
                        self.search_channel_id(handle.trim_start_matches('@'), input)
                            .await?
                    }
                }
            }
            ChannelQuery::Username(name) => {
                match self
                    .lookup_channel_id(("forUsername", name.as_str()))
                    .await?
                {
                    Some(id) => id,
                    None => {
                        tracing::debug!(input, "username lookup missed, falling back to search");
                        self.search_channel_id(&name, input).await?
                    }
                }
            }
            ChannelQuery::Search(query) => self.search_channel_id(&query, input).await?,
        };

        cache.insert(input, &channel_id);
        Ok(channel_id)
    }

    /// Fetches a channel's profile, lifetime statistics and topic labels.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::ChannelNotFound`] when the ID matches nothing (the
    ///   API signals this with an empty `items` array, not a 404).
    /// - Any transport, quota or deserialization error.
    pub async fn fetch_channel(&self, channel_id: &str) -> Result<ChannelProfile, YouTubeError> {
        let url = self.build_url(
            "channels",
            &[
                ("part", "snippet,statistics,contentDetails,topicDetails"),
                ("id", channel_id),
            ],
        );
        let response: ListResponse<ChannelItem> =
            self.request_json(&url, LIST_COST, "channels.list").await?;
        let item = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YouTubeError::ChannelNotFound {
                input: channel_id.to_owned(),
            })?;
        Ok(normalize_channel(item))
    }

    /// Fetches up to `max_videos` of the most recent uploads as raw API
    /// items, paging the uploads playlist and hydrating IDs through
    /// `videos.list` in batches.
    ///
    /// Entries for private or deleted videos survive the playlist page but
    /// drop out of the hydration response, so fewer items than `max_videos`
    /// may come back even on a prolific channel. See [`crate::normalize`]
    /// for the conversion into records.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::PaginationLimit`] if the playlist pages on past the
    ///   internal cap.
    /// - Any transport, quota or deserialization error.
    pub async fn fetch_recent_videos(
        &self,
        uploads_playlist_id: &str,
        max_videos: usize,
    ) -> Result<Vec<VideoItem>, YouTubeError> {
        let mut video_ids: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0usize;

        while video_ids.len() < max_videos {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(YouTubeError::PaginationLimit {
                    playlist_id: uploads_playlist_id.to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            let page_size = (max_videos - video_ids.len()).min(PAGE_SIZE).to_string();
            let mut params = vec![
                ("part", "contentDetails"),
                ("playlistId", uploads_playlist_id),
                ("maxResults", page_size.as_str()),
            ];
            // Bind the owned token outside the if block so the borrow lives
            // long enough.
            let token;
            if let Some(t) = &page_token {
                token = t.clone();
                params.push(("pageToken", &token));
            }

            let url = self.build_url("playlistItems", &params);
            let response: ListResponse<PlaylistItem> = self
                .request_json(&url, LIST_COST, "playlistItems.list")
                .await?;

            video_ids.extend(
                response
                    .items
                    .into_iter()
                    .map(|item| item.content_details.video_id),
            );
            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }
        video_ids.truncate(max_videos);

        let mut items: Vec<VideoItem> = Vec::with_capacity(video_ids.len());
        for chunk in video_ids.chunks(PAGE_SIZE) {
            let ids = chunk.join(",");
            let url = self.build_url(
                "videos",
                &[
                    ("part", "snippet,statistics,contentDetails"),
                    ("id", &ids),
                    ("maxResults", "50"),
                ],
            );
            let response: ListResponse<VideoItem> =
                self.request_json(&url, LIST_COST, "videos.list").await?;
            items.extend(response.items);
        }
        Ok(items)
    }

    /// One `channels.list` call with a single filter parameter, returning the
    /// first matched ID or `None` when the filter matched nothing.
    async fn lookup_channel_id(
        &self,
        filter: (&str, &str),
    ) -> Result<Option<String>, YouTubeError> {
        let url = self.build_url("channels", &[("part", "id"), filter]);
        let response: ListResponse<ChannelIdItem> =
            self.request_json(&url, LIST_COST, "channels.list").await?;
        Ok(response.items.into_iter().next().map(|item| item.id))
    }

    /// Last-resort resolution through `search.list`.
    async fn search_channel_id(&self, query: &str, input: &str) -> Result<String, YouTubeError> {
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("type", "channel"),
                ("maxResults", "1"),
                ("q", query),
            ],
        );
        let response: ListResponse<SearchItem> =
            self.request_json(&url, SEARCH_COST, "search.list").await?;
        response
            .items
            .into_iter()
            .find_map(|item| item.id.channel_id)
            .ok_or_else(|| YouTubeError::ChannelNotFound {
                input: input.to_owned(),
            })
    }

    /// Builds the endpoint URL with the API key and percent-encoded
    /// parameters appended via [`Url::query_pairs_mut`].
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request with retry, charges `cost` quota units per
    /// attempt, and parses the body into `T`.
    async fn request_json<T>(&self, url: &Url, cost: u64, context: &str) -> Result<T, YouTubeError>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.fetch_body(url, cost).await }
        })
        .await?;
        serde_json::from_str(&body).map_err(|e| YouTubeError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// A single attempt: issues the request and maps non-2xx statuses onto
    /// the error taxonomy. Attempts that reach the API charge quota even on
    /// an error status; the API bills those too.
    async fn fetch_body(&self, url: Url, cost: u64) -> Result<String, YouTubeError> {
        let response = self.client.get(url.clone()).send().await?;
        self.quota.charge(cost);
        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Self::map_error_status(status, &url, &body))
    }

    /// Maps an error status plus (possibly empty) body onto [`YouTubeError`],
    /// using the JSON error envelope's `reason` when one is present.
    fn map_error_status(status: StatusCode, url: &Url, body: &str) -> YouTubeError {
        let error = serde_json::from_str::<ApiErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error);
        let reason = error
            .as_ref()
            .and_then(|e| e.errors.first())
            .map_or("", |detail| detail.reason.as_str());
        let message = error
            .as_ref()
            .map_or_else(|| status.to_string(), |e| e.message.clone());

        match status {
            StatusCode::FORBIDDEN => match reason {
                "quotaExceeded" | "dailyLimitExceeded" => YouTubeError::QuotaExceeded(message),
                "rateLimitExceeded" | "userRateLimitExceeded" => YouTubeError::RateLimited {
                    retry_after_secs: DEFAULT_RETRY_AFTER_SECS,
                },
                _ => YouTubeError::ApiError(message),
            },
            StatusCode::BAD_REQUEST if reason == "keyInvalid" || message.contains("API key") => {
                YouTubeError::InvalidApiKey(message)
            }
            StatusCode::TOO_MANY_REQUESTS => YouTubeError::RateLimited {
                retry_after_secs: DEFAULT_RETRY_AFTER_SECS,
            },
            _ if error.is_some() => YouTubeError::ApiError(message),
            _ => YouTubeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            },
        }
    }
}
