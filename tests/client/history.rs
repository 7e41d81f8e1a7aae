use crate::common;
use httpmock::Method::GET;
use serde_json::json;
use vinter_rs::{AssetCategory, ErrorKind};

#[tokio::test]
async fn single_date_queries_one_day_window() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/single_assets_daily")
            .query_param("symbol", "btc-usd-p-d")
            .query_param("start_time", "2021-01-01")
            .query_param("end_time", "2021-01-02")
            .query_param("limit", "1000");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("daily", "btc-usd-p-d", "json"));
    });

    let client = common::client(&server, AssetCategory::SingleAsset);
    let records = client.data_by_date("btc-usd-p-d", "2021-01-01").await.unwrap();

    mock.assert();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["value"], json!(29374.15));
}

#[tokio::test]
async fn date_list_spans_first_to_day_after_last() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/single_assets_daily")
            .query_param("start_time", "2021-01-01")
            .query_param("end_time", "2021-03-01");
        then.status(200)
            .body(common::fixture("daily", "btc-usd-p-d", "json"));
    });

    let client = common::client(&server, AssetCategory::SingleAsset);
    client
        .data_by_dates("btc-usd-p-d", &["2021-01-01", "2021-01-15", "2021-02-28"])
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn unsorted_date_list_is_not_reordered() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/single_assets_daily")
            .query_param("start_time", "2021-02-28")
            .query_param("end_time", "2021-01-02");
        then.status(200)
            .body(common::fixture("daily", "btc-usd-p-d", "json"));
    });

    let client = common::client(&server, AssetCategory::SingleAsset);
    client
        .data_by_dates("btc-usd-p-d", &["2021-02-28", "2021-01-01"])
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn bad_dates_fail_before_request() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body(common::envelope(json!([])));
    });
    let client = common::client(&server, AssetCategory::SingleAsset);

    let err = client
        .data_by_dates("btc-usd-p-d", &["2021-01-01", "2021-02-30"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("date 2021-02-30"), "{err}");

    let err = client.data_by_dates("btc-usd-p-d", &[]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = client.data_by_date("btc-usd-p-q", "2021-01-01").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    mock.assert_hits(0);
}

#[tokio::test]
async fn open_ended_range_omits_end_time() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/multi_assets_hourly")
            .query_param("symbol", "vnt-10-usd-p-h")
            .query_param("start_time", "2023-01-01")
            .query_param_missing("end_time")
            .query_param("limit", "24");
        then.status(200).body(common::envelope(json!([
            {"symbol": "vnt-10-usd-p-h", "value": 1.0},
            {"symbol": "vnt-10-usd-p-h", "value": 2.0}
        ])));
    });

    let client = common::client(&server, AssetCategory::MultiAsset);
    let records = client
        .data_by_range("vnt-10-usd-p-h", "2023-01-01", None, Some(24))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn empty_range_is_no_data() {
    let server = common::setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/nav_daily");
        then.status(200).body(common::envelope(json!([])));
    });

    let client = common::client(&server, AssetCategory::Nav);
    let err = client
        .data_by_range("vnt-nav-p-d", "2020-01-01", Some("2020-02-01"), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataFetch);
    let msg = err.to_string();
    assert!(msg.contains("2020-01-01") && msg.contains("2020-02-01"), "{msg}");
}
