//! HTTP handlers for the trends endpoints.
//!
//! `TrendsHandler` owns the service it was built with and binds its endpoints
//! onto whatever route group it is given; the group decides the prefix.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json,
};

use crate::http::router::RouteGroup;
use crate::trends::error::TrendsResult;
use crate::trends::service::TrendsService;
use crate::trends::types::{
    ChannelAnalytics, ChannelSummary, ChannelTrends, ChannelUpsert, UrlQuery, VideoListing,
    VideoQuery,
};

type SharedService = Arc<TrendsService>;

pub struct TrendsHandler {
    service: SharedService,
}

impl TrendsHandler {
    pub fn new(service: SharedService) -> Self {
        Self { service }
    }

    /// The service this handler dispatches to.
    pub fn service(&self) -> &SharedService {
        &self.service
    }

    /// Bind the trends endpoints onto `group`.
    pub fn register_routes(&self, group: &mut RouteGroup) {
        let state = self.service.clone();
        group
            .route(
                "/channel/{id}",
                get(get_channel).put(put_channel).with_state(state.clone()),
            )
            .route(
                "/channel/title/{title}",
                get(get_channel_by_title).with_state(state.clone()),
            )
            .route("/channel/url", get(get_channel_by_url).with_state(state.clone()))
            .route("/channel/{id}/videos", get(get_videos).with_state(state.clone()))
            .route(
                "/channel/{id}/analytics",
                get(get_analytics).with_state(state.clone()),
            )
            .route("/channel/{id}/trends", get(get_trends).with_state(state));

        tracing::debug!(prefix = %group.prefix(), "Trends routes registered");
    }
}

async fn get_channel(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> TrendsResult<Json<ChannelSummary>> {
    service.channel_by_id(&id).map(Json)
}

async fn put_channel(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    Json(payload): Json<ChannelUpsert>,
) -> TrendsResult<(StatusCode, Json<ChannelSummary>)> {
    let (summary, replaced) = service.upsert_channel(&id, payload)?;
    let status = if replaced {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(summary)))
}

async fn get_channel_by_title(
    State(service): State<SharedService>,
    Path(title): Path<String>,
) -> TrendsResult<Json<ChannelSummary>> {
    service.channel_by_title(&title).map(Json)
}

async fn get_channel_by_url(
    State(service): State<SharedService>,
    Query(query): Query<UrlQuery>,
) -> TrendsResult<Json<ChannelSummary>> {
    service.channel_by_url(&query.url).map(Json)
}

async fn get_videos(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    Query(query): Query<VideoQuery>,
) -> TrendsResult<Json<Vec<VideoListing>>> {
    service.videos(&id, &query).map(Json)
}

async fn get_analytics(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> TrendsResult<Json<ChannelAnalytics>> {
    service.analytics(&id).map(Json)
}

async fn get_trends(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> TrendsResult<Json<ChannelTrends>> {
    service.trends(&id).map(Json)
}
