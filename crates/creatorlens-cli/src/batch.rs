//! Roster batch evaluation with per-channel failure isolation.
//!
//! Resolution runs sequentially so one cache serves the whole run without a
//! lock; the expensive fetch-and-evaluate stage fans out with bounded
//! concurrency. A failing channel becomes a failure entry in the report,
//! never an abort, unless every channel fails.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;

use creatorlens_analysis::ChannelEvaluation;
use creatorlens_core::{AppConfig, ChannelEntry, QuotaSnapshot};
use creatorlens_youtube::{normalize_videos, ResolutionCache, YouTubeClient};

use crate::output::{write_report, OutputOptions};

/// One roster entry that could not be evaluated.
#[derive(Debug, Serialize)]
struct ChannelFailure {
    input: String,
    error: String,
}

/// Aggregate output of a batch run.
#[derive(Debug, Serialize)]
struct BatchReport {
    evaluated: usize,
    failed: usize,
    quota: QuotaSnapshot,
    results: Vec<ChannelEvaluation>,
    failures: Vec<ChannelFailure>,
}

struct EntryOutcome {
    roster_index: usize,
    input: String,
    result: anyhow::Result<Box<ChannelEvaluation>>,
}

/// Evaluate every roster channel and emit one aggregate report.
///
/// # Errors
///
/// Returns an error if the roster cannot be loaded, the client cannot be
/// built, the report cannot be written, or every channel fails.
pub(crate) async fn run_batch(config: &AppConfig, opts: &OutputOptions) -> anyhow::Result<()> {
    let roster = creatorlens_core::load_roster(&config.roster_path)?;
    let client = YouTubeClient::new(config)
        .map_err(|e| anyhow::anyhow!("failed to build YouTube client: {e}"))?;

    let total = roster.channels.len();
    tracing::info!(channels = total, "starting batch evaluation");

    let report = execute_batch(&client, config, roster.channels).await?;

    write_report(&report, opts)?;
    tracing::info!(
        evaluated = report.evaluated,
        failed = report.failed,
        total,
        units_used = report.quota.units_used,
        "batch evaluation complete"
    );

    Ok(())
}

/// Resolve, fetch, and evaluate a roster, isolating per-channel failures.
async fn execute_batch(
    client: &YouTubeClient,
    config: &AppConfig,
    channels: Vec<ChannelEntry>,
) -> anyhow::Result<BatchReport> {
    let mut cache = ResolutionCache::new();
    let mut resolved: Vec<(usize, ChannelEntry, String)> = Vec::new();
    let mut failures: Vec<(usize, ChannelFailure)> = Vec::new();

    for (roster_index, entry) in channels.into_iter().enumerate() {
        match client.resolve_channel(&entry.input, &mut cache).await {
            Ok(channel_id) => resolved.push((roster_index, entry, channel_id)),
            Err(e) => {
                tracing::warn!(input = %entry.input, error = %e, "skipping channel, resolution failed");
                failures.push((
                    roster_index,
                    ChannelFailure {
                        input: entry.input,
                        error: format!("{:#}", anyhow::Error::from(e)),
                    },
                ));
            }
        }
    }

    // One clock reading stamps every report in the run.
    let evaluated_at = Utc::now();
    let max_concurrent = config.max_concurrent_channels.max(1);

    let outcomes: Vec<EntryOutcome> = stream::iter(resolved)
        .map(|(roster_index, entry, channel_id)| async move {
            let result = evaluate_one(client, config, &channel_id, evaluated_at)
                .await
                .map(Box::new);
            if let Ok(report) = &result {
                let display_name = entry.label.as_deref().unwrap_or(&entry.input);
                tracing::info!(
                    channel = %display_name,
                    score = report.composite_score.score,
                    grade = %report.composite_score.grade,
                    "channel evaluated"
                );
            }
            EntryOutcome {
                roster_index,
                input: entry.input,
                result,
            }
        })
        .buffer_unordered(max_concurrent)
        .collect()
        .await;

    let mut results: Vec<(usize, ChannelEvaluation)> = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(report) => results.push((outcome.roster_index, *report)),
            Err(e) => {
                tracing::warn!(input = %outcome.input, error = %e, "channel evaluation failed");
                failures.push((
                    outcome.roster_index,
                    ChannelFailure {
                        input: outcome.input,
                        error: format!("{e:#}"),
                    },
                ));
            }
        }
    }

    if results.is_empty() {
        anyhow::bail!("all {} channels failed evaluation", failures.len());
    }

    // Concurrency scrambles completion order; the report keeps roster order.
    results.sort_by_key(|(roster_index, _)| *roster_index);
    failures.sort_by_key(|(roster_index, _)| *roster_index);

    Ok(BatchReport {
        evaluated: results.len(),
        failed: failures.len(),
        quota: client.quota_snapshot(),
        results: results.into_iter().map(|(_, r)| r).collect(),
        failures: failures.into_iter().map(|(_, f)| f).collect(),
    })
}

/// Fetch and evaluate one already-resolved channel.
///
/// Per-channel quota is not separable when the run shares one client, so
/// individual reports carry no snapshot; the run total lands on the
/// aggregate report instead.
async fn evaluate_one(
    client: &YouTubeClient,
    config: &AppConfig,
    channel_id: &str,
    evaluated_at: DateTime<Utc>,
) -> anyhow::Result<ChannelEvaluation> {
    let profile = client.fetch_channel(channel_id).await?;
    let items = client
        .fetch_recent_videos(&profile.uploads_playlist_id, config.max_videos)
        .await?;
    let videos = normalize_videos(items);
    if videos.is_empty() {
        anyhow::bail!("no analyzable uploads after normalization");
    }

    Ok(creatorlens_analysis::evaluate_channel(
        &profile,
        &videos,
        None,
        evaluated_at,
    ))
}

#[cfg(test)]
mod tests {
    use creatorlens_core::Environment;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn make_config() -> AppConfig {
        AppConfig {
            api_key: "test-key".to_owned(),
            env: Environment::Development,
            log_level: "info".to_owned(),
            roster_path: "./config/channels.yaml".into(),
            max_videos: 1,
            request_timeout_secs: 5,
            user_agent: "creatorlens/0.1 (test)".to_owned(),
            max_retries: 3,
            // Zero base keeps retry tests fast; the jitter multiplies zero.
            retry_backoff_base_ms: 0,
            max_concurrent_channels: 2,
        }
    }

    fn entry(input: &str) -> ChannelEntry {
        ChannelEntry {
            input: input.to_owned(),
            label: None,
            notes: None,
        }
    }

    /// Mount the full fetch path for one healthy channel: profile lookup,
    /// a single-page uploads playlist, and one hydrated video.
    async fn mount_channel(server: &MockServer, channel_id: &str, title: &str) {
        let uploads = format!("UU{}", &channel_id[2..]);
        let video_id = format!("vid-{}", &channel_id[2..4]);

        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("id", channel_id))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "id": channel_id,
                    "snippet": {"title": title, "description": ""},
                    "statistics": {
                        "viewCount": "900000",
                        "subscriberCount": "12000",
                        "hiddenSubscriberCount": false,
                        "videoCount": "80"
                    },
                    "contentDetails": {"relatedPlaylists": {"uploads": uploads}}
                }]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(query_param("playlistId", &uploads))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{"contentDetails": {"videoId": video_id}}]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", &video_id))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "id": video_id,
                    "snippet": {"publishedAt": "2026-03-01T12:00:00Z", "title": "Upload"},
                    "statistics": {"viewCount": "5000", "likeCount": "200", "commentCount": "30"},
                    "contentDetails": {"duration": "PT10M"}
                }]
            })))
            .mount(server)
            .await;
    }

    /// Mount empty responses so every handle and free-text resolution
    /// comes back `ChannelNotFound`.
    async fn mount_resolution_misses(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("part", "id"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn one_failing_channel_does_not_abort_the_run() {
        let server = MockServer::start().await;
        mount_channel(&server, "UCaaaaaaaaaaaaaaaaaaaaaa", "Alpha").await;
        mount_channel(&server, "UCcccccccccccccccccccccc", "Gamma").await;
        mount_resolution_misses(&server).await;

        let config = make_config();
        let client = YouTubeClient::with_base_url(&config, &server.uri())
            .expect("client construction should not fail");
        let roster = vec![
            entry("UCaaaaaaaaaaaaaaaaaaaaaa"),
            entry("@ghostchannel"),
            entry("UCcccccccccccccccccccccc"),
        ];

        let report = execute_batch(&client, &config, roster)
            .await
            .expect("a single bad roster entry must not fail the run");

        assert_eq!(report.evaluated, 2);
        assert_eq!(report.failed, 1);
        // Completion order is nondeterministic; the report keeps roster order.
        assert_eq!(report.results[0].channel.id, "UCaaaaaaaaaaaaaaaaaaaaaa");
        assert_eq!(report.results[1].channel.id, "UCcccccccccccccccccccccc");
        assert_eq!(report.failures[0].input, "@ghostchannel");
        assert!(report.failures[0].error.contains("no channel found"));
    }

    #[tokio::test]
    async fn all_channels_failing_is_an_error() {
        let server = MockServer::start().await;
        mount_resolution_misses(&server).await;

        let config = make_config();
        let client = YouTubeClient::with_base_url(&config, &server.uri())
            .expect("client construction should not fail");
        let roster = vec![entry("@ghostchannel"), entry("@phantomchannel")];

        let err = execute_batch(&client, &config, roster)
            .await
            .expect_err("an empty result set has nothing to report");

        assert!(err.to_string().contains("all 2 channels failed"));
    }
}
