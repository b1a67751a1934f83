//! Trends service: channel lookup, ingestion and analytics.

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::Datelike;
use url::Url;

use crate::observability::metrics;
use crate::trends::analytics::{self, GROWTH_SAMPLE_SIZE, ROLLING_WINDOW};
use crate::trends::error::{TrendsError, TrendsResult};
use crate::trends::store::{ChannelRepository, InMemoryChannelRepository};
use crate::trends::types::{
    Channel, ChannelAnalytics, ChannelSummary, ChannelTrends, ChannelUpsert, SortBy, VideoListing,
    VideoQuery,
};

/// Default and maximum page size for video listings.
pub const DEFAULT_MAX_VIDEOS: usize = 50;
pub const MAX_VIDEOS_LIMIT: usize = 100;

const MAX_CHANNEL_ID_LEN: usize = 64;

/// Ids taken by the static `/channel/title/{title}` and `/channel/url` routes.
pub const RESERVED_CHANNEL_IDS: [&str; 2] = ["title", "url"];

/// Accepted upload years, inclusive.
pub const UPLOAD_YEARS: RangeInclusive<i32> = 2005..=2100;

/// Reject ids that could never name a channel.
pub fn validate_channel_id(id: &str) -> TrendsResult<()> {
    let valid = !id.is_empty()
        && id.len() <= MAX_CHANNEL_ID_LEN
        && !RESERVED_CHANNEL_IDS.contains(&id)
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(TrendsError::InvalidChannelId(id.to_string()))
    }
}

/// How a YouTube channel URL identifies its channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// `/channel/<id>`
    Id(String),
    /// `/@handle`
    Handle(String),
    /// `/c/<name>` or `/user/<name>`; matched against handle, then title.
    Name(String),
}

/// Parse a YouTube channel URL. A missing scheme is tolerated.
pub fn parse_channel_url(raw: &str) -> TrendsResult<ChannelRef> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed)
        .or_else(|_| Url::parse(&format!("https://{trimmed}")))
        .map_err(|_| TrendsError::InvalidUrl(raw.to_string()))?;

    let host = parsed.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    let host = host.strip_prefix("m.").unwrap_or(host);
    if host != "youtube.com" {
        return Err(TrendsError::InvalidUrl(raw.to_string()));
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        ["channel", id, ..] => Ok(ChannelRef::Id((*id).to_string())),
        ["c", name, ..] | ["user", name, ..] => Ok(ChannelRef::Name((*name).to_string())),
        [handle, ..] if handle.starts_with('@') && handle.len() > 1 => {
            Ok(ChannelRef::Handle((*handle).to_string()))
        }
        _ => Err(TrendsError::InvalidUrl(raw.to_string())),
    }
}

/// Channel analytics over an injected catalog.
pub struct TrendsService {
    repository: Arc<dyn ChannelRepository>,
}

impl TrendsService {
    /// Create a service over an empty in-memory catalog.
    pub fn new() -> Self {
        Self::with_repository(Arc::new(InMemoryChannelRepository::new()))
    }

    pub fn with_repository(repository: Arc<dyn ChannelRepository>) -> Self {
        Self { repository }
    }

    fn channel(&self, id: &str) -> TrendsResult<Channel> {
        validate_channel_id(id)?;
        self.repository
            .get(id)
            .ok_or_else(|| TrendsError::ChannelNotFound(id.to_string()))
    }

    pub fn channel_count(&self) -> usize {
        self.repository.count()
    }

    pub fn channel_by_id(&self, id: &str) -> TrendsResult<ChannelSummary> {
        self.channel(id).map(|c| ChannelSummary::from(&c))
    }

    pub fn channel_by_title(&self, title: &str) -> TrendsResult<ChannelSummary> {
        self.repository
            .find_by_title(title)
            .map(|c| ChannelSummary::from(&c))
            .ok_or_else(|| TrendsError::ChannelNotFound(title.to_string()))
    }

    pub fn channel_by_url(&self, raw: &str) -> TrendsResult<ChannelSummary> {
        let found = match parse_channel_url(raw)? {
            ChannelRef::Id(id) => return self.channel_by_id(&id),
            ChannelRef::Handle(handle) => self.repository.find_by_handle(&handle),
            ChannelRef::Name(name) => self
                .repository
                .find_by_handle(&name)
                .or_else(|| self.repository.find_by_title(&name)),
        };
        found
            .map(|c| ChannelSummary::from(&c))
            .ok_or_else(|| TrendsError::ChannelNotFound(raw.to_string()))
    }

    /// Insert or replace a channel and its uploads.
    ///
    /// Returns the stored summary and whether an existing channel was replaced.
    pub fn upsert_channel(
        &self,
        id: &str,
        payload: ChannelUpsert,
    ) -> TrendsResult<(ChannelSummary, bool)> {
        validate_channel_id(id)?;

        let title = payload.title.trim();
        if title.is_empty() {
            return Err(TrendsError::InvalidPayload("title must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for video in &payload.videos {
            if video.id.trim().is_empty() {
                return Err(TrendsError::InvalidPayload("video id must not be empty".into()));
            }
            if !seen.insert(video.id.as_str()) {
                return Err(TrendsError::InvalidPayload(format!(
                    "duplicate video id '{}'",
                    video.id
                )));
            }
            if !UPLOAD_YEARS.contains(&video.published_at.year()) {
                return Err(TrendsError::InvalidPayload(format!(
                    "video '{}' upload date {} is outside {}..={}",
                    video.id,
                    video.published_at.date_naive(),
                    UPLOAD_YEARS.start(),
                    UPLOAD_YEARS.end()
                )));
            }
        }

        let channel = Channel {
            id: id.to_string(),
            title: title.to_string(),
            custom_url: payload
                .custom_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
            videos: payload.videos,
        };
        let summary = ChannelSummary::from(&channel);
        let replaced = self.repository.upsert(channel);

        metrics::record_channel_count(self.repository.count());
        tracing::info!(
            channel_id = %id,
            videos = summary.video_count,
            replaced,
            "Channel stored"
        );

        Ok((summary, replaced))
    }

    /// List a channel's uploads after filtering, sorting and truncation.
    pub fn videos(&self, id: &str, query: &VideoQuery) -> TrendsResult<Vec<VideoListing>> {
        let limit = query.max_videos.unwrap_or(DEFAULT_MAX_VIDEOS);
        if !(1..=MAX_VIDEOS_LIMIT).contains(&limit) {
            return Err(TrendsError::InvalidQuery(format!(
                "maxVideos must be between 1 and {MAX_VIDEOS_LIMIT}"
            )));
        }

        let mut videos = self.channel(id)?.videos;
        videos.retain(|v| {
            query.min_views.map_or(true, |min| v.views >= min)
                && query.min_likes.map_or(true, |min| v.likes >= min)
        });

        match query.sort_by {
            SortBy::Recency => videos.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
            SortBy::Views => videos.sort_by(|a, b| b.views.cmp(&a.views)),
            SortBy::Likes => videos.sort_by(|a, b| b.likes.cmp(&a.likes)),
        }
        videos.truncate(limit);

        Ok(videos.iter().map(VideoListing::from).collect())
    }

    pub fn analytics(&self, id: &str) -> TrendsResult<ChannelAnalytics> {
        self.channel(id).map(|c| analytics::channel_analytics(&c))
    }

    pub fn trends(&self, id: &str) -> TrendsResult<ChannelTrends> {
        self.channel(id)
            .map(|c| analytics::channel_trends(&c, ROLLING_WINDOW, GROWTH_SAMPLE_SIZE))
    }
}

impl Default for TrendsService {
    fn default() -> Self {
        Self::new()
    }
}
