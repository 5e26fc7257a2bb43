//! Roster-input classification and channel-ID resolution caching.
//!
//! Roster entries arrive in several forms: a raw `UC…` channel ID, an
//! `@handle`, a channel URL in any of its historical shapes, or free text.
//! Classification is pure string inspection; the network side of resolution
//! lives in [`crate::client`].

use std::collections::HashMap;

/// The cheapest API strategy that can resolve a given roster input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelQuery {
    /// Already a canonical `UC…` ID; no lookup call needed.
    Id(String),
    /// An `@handle`, resolvable via `channels.list?forHandle=`.
    Handle(String),
    /// A legacy `/user/` name, resolvable via `channels.list?forUsername=`.
    Username(String),
    /// Free text; requires a `search.list` call at 100 quota units.
    Search(String),
}

/// Classifies a roster input. Rules, first match wins:
///
/// 1. `UC` followed by 22 ID characters → [`ChannelQuery::Id`].
/// 2. Leading `@` → [`ChannelQuery::Handle`].
/// 3. A youtube.com URL:
///    - `/channel/UC…` → `Id`
///    - `/@handle` → `Handle`
///    - `/user/name` → `Username`
///    - `/c/name` and bare `/name` → `Search` (custom URLs have no direct
///      lookup parameter on the API)
/// 4. Anything else → `Search`.
#[must_use]
pub fn classify_input(input: &str) -> ChannelQuery {
    let trimmed = input.trim();

    if is_channel_id(trimmed) {
        return ChannelQuery::Id(trimmed.to_owned());
    }
    if trimmed.starts_with('@') && !trimmed.contains('/') {
        return ChannelQuery::Handle(trimmed.to_owned());
    }
    if let Some(path) = youtube_url_path(trimmed) {
        return classify_url_path(path, trimmed);
    }
    ChannelQuery::Search(trimmed.to_owned())
}

/// Memo of roster inputs already resolved this run.
///
/// Lives for one batch; a roster that names the same input string twice hits
/// the API once. Distinct aliases of one channel (an `@handle` and its URL
/// form) are still separate keys, since equality is only knowable after
/// resolution.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<String, String>,
}

impl ResolutionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, input: &str) -> Option<&str> {
        self.entries.get(input.trim()).map(String::as_str)
    }

    pub fn insert(&mut self, input: &str, channel_id: &str) {
        self.entries
            .insert(input.trim().to_owned(), channel_id.to_owned());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `UC` + 22 characters drawn from the base64url-ish ID alphabet.
fn is_channel_id(s: &str) -> bool {
    s.len() == 24
        && s.starts_with("UC")
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Strips scheme and host from any youtube.com URL form, returning the path
/// after the first `/`. `None` when the input is not a YouTube URL.
fn youtube_url_path(s: &str) -> Option<&str> {
    let hosts = [
        "youtube.com/",
        "www.youtube.com/",
        "m.youtube.com/",
        "music.youtube.com/",
    ];
    let without_scheme = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .unwrap_or(s);
    hosts
        .iter()
        .find_map(|host| without_scheme.strip_prefix(host))
}

fn classify_url_path(path: &str, original: &str) -> ChannelQuery {
    if let Some(rest) = path.strip_prefix("channel/") {
        let candidate = first_segment(rest);
        if is_channel_id(candidate) {
            return ChannelQuery::Id(candidate.to_owned());
        }
        return ChannelQuery::Search(original.to_owned());
    }
    if path.starts_with('@') {
        return ChannelQuery::Handle(first_segment(path).to_owned());
    }
    if let Some(rest) = path.strip_prefix("user/") {
        return ChannelQuery::Username(first_segment(rest).to_owned());
    }
    if let Some(rest) = path.strip_prefix("c/") {
        return ChannelQuery::Search(first_segment(rest).to_owned());
    }
    // Bare youtube.com/<name> legacy custom URL.
    let name = first_segment(path);
    if name.is_empty() {
        ChannelQuery::Search(original.to_owned())
    } else {
        ChannelQuery::Search(name.to_owned())
    }
}

/// Everything up to the first path, query or fragment delimiter.
fn first_segment(path: &str) -> &str {
    match path.find(['/', '?', '&', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}
