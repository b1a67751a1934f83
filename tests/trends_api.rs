//! End-to-end flows over the /api/v1 trends endpoints.

use serde_json::{json, Value};

mod common;

fn sample_channel() -> Value {
    let videos: Vec<Value> = (0..10)
        .map(|i| {
            json!({
                "id": format!("vid{i}"),
                "title": format!("Episode {i}"),
                "publishedAt": format!("2024-02-{:02}T18:00:00Z", 1 + i * 2),
                "views": 1000 + i * 500,
                "likes": 100 + i * 10,
                "comments": 10,
            })
        })
        .collect();

    json!({
        "title": "Rust Weekly",
        "customUrl": "@rustweekly",
        "videos": videos,
    })
}

#[tokio::test]
async fn test_ingest_then_query_every_view() {
    let server = common::spawn_server().await;
    let client = common::client();

    let res = client
        .put(server.url("/api/v1/channel/UCrust"))
        .json(&sample_channel())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let by_title: Value = client
        .get(server.url("/api/v1/channel/title/rust%20weekly"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_title["id"], "UCrust");

    let by_url = client
        .get(server.url("/api/v1/channel/url"))
        .query(&[("url", "https://www.youtube.com/@rustweekly")])
        .send()
        .await
        .unwrap();
    assert_eq!(by_url.status(), 200);

    let videos: Vec<Value> = client
        .get(server.url("/api/v1/channel/UCrust/videos"))
        .query(&[("sortBy", "views"), ("maxVideos", "3")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<_> = videos.iter().map(|v| v["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["vid9", "vid8", "vid7"]);

    let analytics: Value = client
        .get(server.url("/api/v1/channel/UCrust/analytics"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(analytics["totalVideos"], 10);
    assert_eq!(analytics["averageViews"], 3250.0);

    let trends: Value = client
        .get(server.url("/api/v1/channel/UCrust/trends"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(trends["performanceOverTime"].as_array().unwrap().len(), 10);
    assert_eq!(trends["rollingAverages"].as_array().unwrap().len(), 10);
    // First five average 2000 views, last five 4500.
    assert_eq!(trends["growthRate"]["views"], 125.0);

    server.stop().await;
}

#[tokio::test]
async fn test_invalid_requests_are_rejected() {
    let server = common::spawn_server().await;
    let client = common::client();

    let res = client
        .put(server.url("/api/v1/channel/UCbad"))
        .json(&json!({ "title": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let res = client
        .put(server.url("/api/v1/channel/UCrust"))
        .json(&sample_channel())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let res = client
        .get(server.url("/api/v1/channel/UCrust/videos"))
        .query(&[("maxVideos", "500")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let res = client
        .get(server.url("/api/v1/channel/url"))
        .query(&[("url", "https://example.com/@rustweekly")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    server.stop().await;
}
