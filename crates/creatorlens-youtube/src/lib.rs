//! YouTube Data API collaborator: roster-input resolution, channel and video
//! fetching, quota accounting, and normalization into [`creatorlens_core`]
//! records.
//!
//! The evaluation pipeline itself never touches the network; everything it
//! consumes is produced here and handed over as plain data.

pub mod client;
pub mod duration;
pub mod error;
pub mod normalize;
pub mod quota;
pub mod resolve;
mod retry;
pub mod types;

pub use client::YouTubeClient;
pub use duration::parse_duration_secs;
pub use error::YouTubeError;
pub use normalize::{normalize_channel, normalize_videos};
pub use quota::QuotaLedger;
pub use resolve::{classify_input, ChannelQuery, ResolutionCache};
