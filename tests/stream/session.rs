use crate::common::API_KEY;
use url::Url;
use vinter_rs::{AssetCategory, Client, ErrorKind, SessionState, VinterError, WsSession};

#[test]
fn client_stream_resolves_url_with_token() {
    let client = Client::new(API_KEY, AssetCategory::MultiAsset).unwrap();
    let session = client.stream("vnt-10-usd-p-r").unwrap();

    assert_eq!(
        session.url().as_str(),
        "wss://www.vinterapi.com/ws/multiassets/vnt-10-usd-p-r?token=my_api_key"
    );
    assert_eq!(session.symbol(), "vnt-10-usd-p-r");
    assert_eq!(session.state(), SessionState::Idle);
    assert!(!format!("{session:?}").contains(API_KEY));
}

#[test]
fn builder_uses_custom_base() {
    let session = WsSession::builder()
        .api_key("k")
        .asset_type("single_assets")
        .symbol("btc-usd-p-r")
        .ws_base(Url::parse("ws://127.0.0.1:9001").unwrap())
        .build()
        .unwrap();
    assert_eq!(
        session.url().as_str(),
        "ws://127.0.0.1:9001/singleassets/btc-usd-p-r?token=k"
    );
}

#[test]
fn staking_yields_cannot_stream() {
    let err = WsSession::builder()
        .api_key("k")
        .asset_type(AssetCategory::StakingYield)
        .symbol("eth-staking-d")
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let client = Client::new("k", AssetCategory::StakingYield).unwrap();
    assert_eq!(
        client.stream("eth-staking-d").unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
}

#[test]
fn builder_validation_order() {
    let err = WsSession::builder()
        .asset_type("bogus")
        .build()
        .unwrap_err();
    assert!(matches!(err, VinterError::TypeMismatch(_)), "got {err:?}");

    let err = WsSession::builder()
        .api_key("k")
        .asset_type("bogus")
        .symbol("btc-usd-p-r")
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = WsSession::builder()
        .api_key("k")
        .asset_type("nav")
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = WsSession::builder()
        .api_key("k")
        .asset_type("nav")
        .symbol("vnt-nav-p")
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn close_before_open_is_a_no_op() {
    let client = Client::new(API_KEY, AssetCategory::Nav).unwrap();
    let session = client.stream("vnt-nav-p-r").unwrap();

    session.close();
    session.close_handle().close();
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn blocking_client_streams_too() {
    let client = vinter_rs::blocking::Client::new(API_KEY, AssetCategory::SingleAsset).unwrap();
    let session = client.stream("btc-usd-p-r").unwrap();
    assert!(
        session
            .url()
            .as_str()
            .ends_with("/singleassets/btc-usd-p-r?token=my_api_key")
    );
}
