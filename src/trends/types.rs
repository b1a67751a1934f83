//! Channel catalog and analytics payload types.
//!
//! Wire types serialize with camelCase field names to match the dashboard
//! frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";
const THUMBNAIL_BASE_URL: &str = "https://i.ytimg.com/vi";

/// A single uploaded video and its engagement counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    /// Upload time. Accepts `uploadDate` on input as well.
    #[serde(alias = "uploadDate")]
    pub published_at: DateTime<Utc>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

/// A channel together with every known upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub title: String,
    /// Handle such as `@somechannel`, if the channel has one.
    pub custom_url: Option<String>,
    pub videos: Vec<Video>,
}

/// Body accepted by `PUT /channel/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelUpsert {
    pub title: String,
    #[serde(default)]
    pub custom_url: Option<String>,
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// Channel summary returned by the lookup endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    pub channel_url: String,
    pub video_count: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_upload: Option<DateTime<Utc>>,
}

fn saturating_total(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}

impl From<&Channel> for ChannelSummary {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.clone(),
            title: channel.title.clone(),
            custom_url: channel.custom_url.clone(),
            channel_url: format!("{}/channel/{}", YOUTUBE_BASE_URL, channel.id),
            video_count: channel.videos.len(),
            total_views: saturating_total(channel.videos.iter().map(|v| v.views)),
            total_likes: saturating_total(channel.videos.iter().map(|v| v.likes)),
            total_comments: saturating_total(channel.videos.iter().map(|v| v.comments)),
            latest_upload: channel.videos.iter().map(|v| v.published_at).max(),
        }
    }
}

/// A video as listed by `GET /channel/{id}/videos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListing {
    pub id: String,
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub upload_date: DateTime<Utc>,
    pub thumbnail_url: String,
    pub video_url: String,
}

impl From<&Video> for VideoListing {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id.clone(),
            title: video.title.clone(),
            views: video.views,
            likes: video.likes,
            comments: video.comments,
            upload_date: video.published_at,
            thumbnail_url: format!("{}/{}/hqdefault.jpg", THUMBNAIL_BASE_URL, video.id),
            video_url: format!("{}/watch?v={}", YOUTUBE_BASE_URL, video.id),
        }
    }
}

/// Ordering for video listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Recency,
    Views,
    Likes,
}

/// Query parameters for `GET /channel/{id}/videos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoQuery {
    #[serde(default)]
    pub sort_by: SortBy,
    pub max_videos: Option<usize>,
    pub min_views: Option<u64>,
    pub min_likes: Option<u64>,
}

/// Query parameters for `GET /channel/url`.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlQuery {
    pub url: String,
}

/// Per-upload metrics, in upload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub upload_date: DateTime<Utc>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes_to_views: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingAverage {
    /// 1-based position of the upload in chronological order.
    pub upload_index: usize,
    pub average_views: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyUploads {
    /// ISO week label, e.g. `2024-W07`.
    pub week: String,
    pub count: usize,
}

/// Percentage change between the earliest and latest uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthRates {
    pub views: f64,
    pub likes: f64,
    pub comments: f64,
}

/// Response of `GET /channel/{id}/trends`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTrends {
    pub channel_id: String,
    pub channel_title: String,
    pub performance_over_time: Vec<PerformancePoint>,
    pub rolling_averages: Vec<RollingAverage>,
    pub upload_frequency_weekly: Vec<WeeklyUploads>,
    pub growth_rate: GrowthRates,
}

/// Chart series over uploads, labelled by upload date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub labels: Vec<String>,
    pub views: Vec<u64>,
    pub likes: Vec<u64>,
    pub comments: Vec<u64>,
}

/// Response of `GET /channel/{id}/analytics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAnalytics {
    pub channel_id: String,
    pub channel_title: String,
    pub total_videos: usize,
    pub average_views: f64,
    pub like_to_view_ratio: f64,
    pub comment_to_view_ratio: f64,
    pub trends: MetricSeries,
}
