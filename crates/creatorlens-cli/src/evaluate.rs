//! Single-channel evaluation command.

use chrono::Utc;
use creatorlens_core::AppConfig;
use creatorlens_youtube::{normalize_videos, ResolutionCache, YouTubeClient};

use crate::output::{write_report, OutputOptions};

/// Resolve, fetch, and evaluate one channel, then emit the report.
///
/// # Errors
///
/// Returns an error if the input cannot be resolved, any API call fails,
/// or no uploads survive normalization.
pub(crate) async fn run_evaluate(
    config: &AppConfig,
    input: &str,
    opts: &OutputOptions,
) -> anyhow::Result<()> {
    let client = YouTubeClient::new(config)
        .map_err(|e| anyhow::anyhow!("failed to build YouTube client: {e}"))?;
    let mut cache = ResolutionCache::new();

    let channel_id = client.resolve_channel(input, &mut cache).await?;
    let profile = client.fetch_channel(&channel_id).await?;

    let items = client
        .fetch_recent_videos(&profile.uploads_playlist_id, config.max_videos)
        .await?;
    let videos = normalize_videos(items);
    if videos.is_empty() {
        anyhow::bail!(
            "channel '{}' has no analyzable uploads; nothing to evaluate",
            profile.title
        );
    }

    let report = creatorlens_analysis::evaluate_channel(
        &profile,
        &videos,
        Some(client.quota_snapshot()),
        Utc::now(),
    );
    tracing::info!(
        channel = %report.channel.title,
        score = report.composite_score.score,
        grade = %report.composite_score.grade,
        "channel evaluated"
    );

    write_report(&report, opts)
}
