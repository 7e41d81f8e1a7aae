#![cfg(feature = "tracing-subscriber")]

use crate::common;
use httpmock::Method::GET;
use std::sync::{Arc, Mutex};
use tracing::span::{Attributes, Id};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use vinter_rs::AssetCategory;

#[derive(Clone, Default)]
struct SpanNames(Arc<Mutex<Vec<String>>>);

impl<S: tracing::Subscriber> Layer<S> for SpanNames {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.0
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }
}

#[test]
fn every_blocking_operation_opens_a_span() {
    let server = common::setup_server();
    let _active = server.mock(|when, then| {
        when.method(GET).path("/active_multi_assets");
        then.status(200)
            .body(common::fixture("active", "multi_assets", "json"));
    });
    let _daily = server.mock(|when, then| {
        when.method(GET).path("/multi_assets_daily");
        then.status(200)
            .body(common::fixture("daily", "btc-usd-p-d", "json"));
    });

    let client = common::blocking_client(&server, AssetCategory::MultiAsset);
    let names = SpanNames::default();
    let subscriber = tracing_subscriber::registry().with(names.clone());

    tracing::subscriber::with_default(subscriber, || {
        let symbol = "vnt-10-usd-p-d";
        client.all_active_symbols(None).unwrap();
        client.current_rebalance_weights(symbol).unwrap();
        client.previous_rebalance_date(symbol).unwrap();
        client.previous_review_date(symbol).unwrap();
        client.next_rebalance_date(symbol).unwrap();
        client.next_review_date(symbol).unwrap();
        client.next_rebalance_weights(symbol).unwrap();
        client.latest_value(symbol).unwrap();
        client.data_by_date(symbol, "2021-01-01").unwrap();
        client.data_by_dates(symbol, &["2021-01-01", "2021-01-05"]).unwrap();
    });

    let recorded = names.0.lock().unwrap().clone();
    for op in [
        "all_active_symbols",
        "all_active_data",
        "current_rebalance_weights",
        "active_data",
        "previous_rebalance_date",
        "previous_review_date",
        "next_rebalance_date",
        "next_review_date",
        "next_rebalance_weights",
        "latest_value",
        "latest_data",
        "data_by_date",
        "data_by_dates",
        "data_by_range",
    ] {
        assert!(recorded.iter().any(|n| n == op), "no span for {op}: {recorded:?}");
    }
}
