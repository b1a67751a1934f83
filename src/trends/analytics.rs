//! Pure analytics over a channel's uploads.
//!
//! Every function here is deterministic and side-effect free; the service
//! layer handles lookup and the handler handles transport.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::trends::types::{
    Channel, ChannelAnalytics, ChannelTrends, GrowthRates, MetricSeries, PerformancePoint,
    RollingAverage, Video, WeeklyUploads,
};

/// Number of trailing uploads averaged by [`rolling_averages`].
pub const ROLLING_WINDOW: usize = 5;

/// Uploads averaged at each end of the timeline by [`growth_rates`].
pub const GROWTH_SAMPLE_SIZE: usize = 5;

/// Upper bound for a reported growth percentage.
pub const MAX_GROWTH_PERCENT: f64 = 10_000.0;

// Minimum starting averages below which growth is reported as zero.
const VIEWS_GROWTH_THRESHOLD: f64 = 100.0;
const LIKES_GROWTH_THRESHOLD: f64 = 10.0;
const COMMENTS_GROWTH_THRESHOLD: f64 = 1.0;

/// Upper bound on buckets emitted by [`upload_frequency_weekly`]; older weeks
/// are dropped.
pub const MAX_WEEKLY_BUCKETS: usize = 1_560;

fn ratio(numerator: impl Into<u128>, denominator: impl Into<u128>) -> f64 {
    let (numerator, denominator) = (numerator.into(), denominator.into());
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn total(values: impl Iterator<Item = u64>) -> u128 {
    values.map(u128::from).sum()
}

/// Uploads in chronological order. Ties keep a stable order by video id.
pub fn performance_over_time(videos: &[Video]) -> Vec<PerformancePoint> {
    let mut sorted: Vec<&Video> = videos.iter().collect();
    sorted.sort_by(|a, b| {
        a.published_at
            .cmp(&b.published_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    sorted
        .into_iter()
        .map(|v| PerformancePoint {
            upload_date: v.published_at,
            views: v.views,
            likes: v.likes,
            comments: v.comments,
            likes_to_views: (v.views > 0).then(|| ratio(v.likes, v.views)),
        })
        .collect()
}

/// Trailing mean of views. The first `window - 1` entries average over the
/// uploads seen so far.
pub fn rolling_averages(points: &[PerformancePoint], window: usize) -> Vec<RollingAverage> {
    let window = window.max(1);
    let mut sum: u128 = 0;

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            sum += u128::from(point.views);
            if i >= window {
                sum -= u128::from(points[i - window].views);
            }
            let span = (i + 1).min(window);
            RollingAverage {
                upload_index: i + 1,
                average_views: sum as f64 / span as f64,
            }
        })
        .collect()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// Upload counts per ISO week, contiguous from the first to the last upload.
/// At most [`MAX_WEEKLY_BUCKETS`] weeks are returned, ending at the last upload.
pub fn upload_frequency_weekly(points: &[PerformancePoint]) -> Vec<WeeklyUploads> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for point in points {
        *counts
            .entry(week_start(point.upload_date.date_naive()))
            .or_default() += 1;
    }

    let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };

    let span_days = 7 * (MAX_WEEKLY_BUCKETS as u64 - 1);
    let earliest = last
        .checked_sub_days(Days::new(span_days))
        .map_or(first, |bound| bound.max(first));

    let mut weeks = Vec::new();
    let mut week = earliest;
    while week <= last {
        weeks.push(WeeklyUploads {
            week: week_label(week),
            count: counts.get(&week).copied().unwrap_or(0),
        });
        match week.checked_add_days(Days::new(7)) {
            Some(next) => week = next,
            None => break,
        }
    }
    weeks
}

fn mean_metrics(points: &[PerformancePoint]) -> (f64, f64, f64) {
    let n = points.len().max(1) as f64;
    let (views, likes, comments) = points.iter().fold((0u128, 0u128, 0u128), |acc, p| {
        (
            acc.0 + u128::from(p.views),
            acc.1 + u128::from(p.likes),
            acc.2 + u128::from(p.comments),
        )
    });
    (views as f64 / n, likes as f64 / n, comments as f64 / n)
}

fn growth(first: f64, last: f64, threshold: f64) -> f64 {
    if first == 0.0 || first < threshold {
        return 0.0;
    }
    (((last - first) / first) * 100.0).min(MAX_GROWTH_PERCENT)
}

/// Percentage change from the mean of the first `sample` uploads to the mean
/// of the last `sample` uploads. Requires `2 * sample` points, else zeros.
pub fn growth_rates(points: &[PerformancePoint], sample: usize) -> GrowthRates {
    if sample == 0 || points.len() < sample * 2 {
        return GrowthRates::default();
    }

    let (first_views, first_likes, first_comments) = mean_metrics(&points[..sample]);
    let (last_views, last_likes, last_comments) = mean_metrics(&points[points.len() - sample..]);

    GrowthRates {
        views: growth(first_views, last_views, VIEWS_GROWTH_THRESHOLD),
        likes: growth(first_likes, last_likes, LIKES_GROWTH_THRESHOLD),
        comments: growth(first_comments, last_comments, COMMENTS_GROWTH_THRESHOLD),
    }
}

/// Aggregate engagement figures and date-labelled series for a channel.
pub fn channel_analytics(channel: &Channel) -> ChannelAnalytics {
    let points = performance_over_time(&channel.videos);
    let total_views = total(points.iter().map(|p| p.views));
    let total_likes = total(points.iter().map(|p| p.likes));
    let total_comments = total(points.iter().map(|p| p.comments));

    let average_views = if points.is_empty() {
        0.0
    } else {
        total_views as f64 / points.len() as f64
    };

    let trends = MetricSeries {
        labels: points
            .iter()
            .map(|p| p.upload_date.format("%Y-%m-%d").to_string())
            .collect(),
        views: points.iter().map(|p| p.views).collect(),
        likes: points.iter().map(|p| p.likes).collect(),
        comments: points.iter().map(|p| p.comments).collect(),
    };

    ChannelAnalytics {
        channel_id: channel.id.clone(),
        channel_title: channel.title.clone(),
        total_videos: points.len(),
        average_views,
        like_to_view_ratio: ratio(total_likes, total_views),
        comment_to_view_ratio: ratio(total_comments, total_views),
        trends,
    }
}

/// Full trends report for a channel.
pub fn channel_trends(channel: &Channel, window: usize, sample: usize) -> ChannelTrends {
    let points = performance_over_time(&channel.videos);
    ChannelTrends {
        channel_id: channel.id.clone(),
        channel_title: channel.title.clone(),
        rolling_averages: rolling_averages(&points, window),
        upload_frequency_weekly: upload_frequency_weekly(&points),
        growth_rate: growth_rates(&points, sample),
        performance_over_time: points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn video(id: &str, day: u32, views: u64, likes: u64, comments: u64) -> Video {
        Video {
            id: id.into(),
            title: format!("video {id}"),
            published_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
            views,
            likes,
            comments,
        }
    }

    fn point(views: u64, likes: u64, comments: u64) -> PerformancePoint {
        PerformancePoint {
            upload_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            views,
            likes,
            comments,
            likes_to_views: None,
        }
    }

    #[test]
    fn test_performance_sorted_by_upload_date() {
        let videos = vec![video("c", 20, 30, 3, 0), video("a", 2, 10, 1, 0), video("b", 9, 0, 0, 0)];
        let points = performance_over_time(&videos);

        let views: Vec<_> = points.iter().map(|p| p.views).collect();
        assert_eq!(views, vec![10, 0, 30]);
        assert_eq!(points[0].likes_to_views, Some(0.1));
        assert_eq!(points[1].likes_to_views, None);
    }

    #[test]
    fn test_rolling_average_uses_partial_windows() {
        let points: Vec<_> = [10, 20, 30, 40].iter().map(|&v| point(v, 0, 0)).collect();
        let averages = rolling_averages(&points, 3);

        let values: Vec<_> = averages.iter().map(|a| a.average_views).collect();
        assert_eq!(values, vec![10.0, 15.0, 20.0, 30.0]);
        assert_eq!(averages[0].upload_index, 1);
        assert_eq!(averages[3].upload_index, 4);
    }

    #[test]
    fn test_rolling_average_zero_window_behaves_like_one() {
        let points: Vec<_> = [5, 7].iter().map(|&v| point(v, 0, 0)).collect();
        let values: Vec<_> = rolling_averages(&points, 0)
            .iter()
            .map(|a| a.average_views)
            .collect();
        assert_eq!(values, vec![5.0, 7.0]);
    }

    #[test]
    fn test_weekly_frequency_fills_gaps() {
        // 2024-01-01 is a Monday, ISO week 1.
        let videos = vec![
            video("a", 1, 1, 0, 0),
            video("b", 3, 1, 0, 0),
            video("c", 22, 1, 0, 0),
        ];
        let weeks = upload_frequency_weekly(&performance_over_time(&videos));

        let labels: Vec<_> = weeks.iter().map(|w| w.week.as_str()).collect();
        let counts: Vec<_> = weeks.iter().map(|w| w.count).collect();
        assert_eq!(labels, vec!["2024-W01", "2024-W02", "2024-W03", "2024-W04"]);
        assert_eq!(counts, vec![2, 0, 0, 1]);
    }

    #[test]
    fn test_weekly_frequency_uses_iso_year() {
        let late = Video {
            published_at: Utc.with_ymd_and_hms(2024, 12, 30, 0, 0, 0).unwrap(),
            ..video("a", 1, 1, 0, 0)
        };
        let weeks = upload_frequency_weekly(&performance_over_time(&[late]));
        assert_eq!(weeks[0].week, "2025-W01");
    }

    #[test]
    fn test_weekly_frequency_near_calendar_end_does_not_overflow() {
        let edge = Video {
            published_at: NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap().and_utc(),
            ..video("a", 1, 1, 0, 0)
        };
        let weeks = upload_frequency_weekly(&performance_over_time(&[edge]));
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].count, 1);
    }

    #[test]
    fn test_weekly_frequency_is_bounded() {
        let ancient = Video {
            published_at: Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap(),
            ..video("a", 1, 1, 0, 0)
        };
        let distant = Video {
            published_at: Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0).unwrap(),
            ..video("b", 1, 1, 0, 0)
        };
        let weeks = upload_frequency_weekly(&performance_over_time(&[ancient, distant]));

        assert_eq!(weeks.len(), MAX_WEEKLY_BUCKETS);
        assert_eq!(weeks.last().unwrap().count, 1);
        assert_eq!(weeks.iter().map(|w| w.count).sum::<usize>(), 1);
    }

    #[test]
    fn test_analytics_totals_do_not_overflow() {
        let channel = Channel {
            id: "UC1".into(),
            title: "Huge".into(),
            custom_url: None,
            videos: vec![video("a", 1, u64::MAX, u64::MAX, 0), video("b", 2, 1, 1, 0)],
        };
        let analytics = channel_analytics(&channel);

        assert_eq!(analytics.like_to_view_ratio, 1.0);
        assert!(analytics.average_views > u64::MAX as f64 / 4.0);
    }

    #[test]
    fn test_growth_requires_two_full_samples() {
        let points: Vec<_> = (0..9).map(|_| point(1000, 100, 10)).collect();
        assert_eq!(growth_rates(&points, 5), GrowthRates::default());
    }

    #[test]
    fn test_growth_compares_first_and_last_samples() {
        let mut points: Vec<_> = (0..5).map(|_| point(200, 20, 4)).collect();
        points.extend((0..5).map(|_| point(300, 10, 4)));

        let rates = growth_rates(&points, 5);
        assert_eq!(rates.views, 50.0);
        assert_eq!(rates.likes, -50.0);
        assert_eq!(rates.comments, 0.0);
    }

    #[test]
    fn test_growth_below_threshold_is_zero_and_cap_applies() {
        let mut points: Vec<_> = (0..5).map(|_| point(99, 10, 1)).collect();
        points.extend((0..5).map(|_| point(1_000_000, 10_000, 1)));

        let rates = growth_rates(&points, 5);
        assert_eq!(rates.views, 0.0);
        assert_eq!(rates.likes, MAX_GROWTH_PERCENT);
        assert_eq!(rates.comments, 0.0);
    }

    #[test]
    fn test_analytics_ratios_over_totals() {
        let channel = Channel {
            id: "UC1".into(),
            title: "Rust Talks".into(),
            custom_url: None,
            videos: vec![video("b", 5, 300, 30, 3), video("a", 1, 100, 20, 7)],
        };
        let analytics = channel_analytics(&channel);

        assert_eq!(analytics.total_videos, 2);
        assert_eq!(analytics.average_views, 200.0);
        assert_eq!(analytics.like_to_view_ratio, 50.0 / 400.0);
        assert_eq!(analytics.comment_to_view_ratio, 10.0 / 400.0);
        assert_eq!(analytics.trends.labels, vec!["2024-01-01", "2024-01-05"]);
        assert_eq!(analytics.trends.views, vec![100, 300]);
    }

    #[test]
    fn test_empty_channel_yields_empty_reports() {
        let channel = Channel {
            id: "UC1".into(),
            title: "Empty".into(),
            custom_url: None,
            videos: Vec::new(),
        };

        let analytics = channel_analytics(&channel);
        assert_eq!(analytics.average_views, 0.0);
        assert_eq!(analytics.like_to_view_ratio, 0.0);

        let trends = channel_trends(&channel, ROLLING_WINDOW, GROWTH_SAMPLE_SIZE);
        assert!(trends.performance_over_time.is_empty());
        assert!(trends.rolling_averages.is_empty());
        assert!(trends.upload_frequency_weekly.is_empty());
        assert_eq!(trends.growth_rate, GrowthRates::default());
    }
}
