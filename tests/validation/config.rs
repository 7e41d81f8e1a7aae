use crate::common;
use httpmock::Method::GET;
use serde_json::json;
use std::collections::HashMap;
use vinter_rs::config::{API_BASE_VAR, API_KEY_VAR, WS_BASE_VAR, from_lookup};
use vinter_rs::{AssetCategory, ErrorKind};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn key_from_environment_is_used() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/active_multi_assets")
            .header("authorization", "env-key");
        then.status(200).body(common::envelope(json!([])));
    });

    let client = from_lookup(lookup(&[
        (API_KEY_VAR, "env-key"),
        (API_BASE_VAR, server.base_url().as_str()),
    ]))
    .unwrap()
    .asset_type(AssetCategory::MultiAsset)
    .build_blocking()
    .unwrap();

    assert_eq!(client.asset_type(), AssetCategory::MultiAsset);
    assert!(client.all_active_data(None).unwrap().is_empty());
    mock.assert();
}

#[test]
fn explicit_settings_win_over_environment() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/active_nav")
            .header("authorization", "explicit");
        then.status(200).body(common::envelope(json!([])));
    });

    let client = from_lookup(lookup(&[
        (API_KEY_VAR, "env-key"),
        (API_BASE_VAR, "http://127.0.0.1:1/unused"),
    ]))
    .unwrap()
    .api_key("explicit")
    .api_base(common::base_url(&server))
    .asset_type("nav")
    .build_blocking()
    .unwrap();

    assert!(client.all_active_data(None).unwrap().is_empty());
    mock.assert();
}

#[test]
fn empty_variables_are_ignored() {
    let err = from_lookup(lookup(&[(API_KEY_VAR, ""), (API_BASE_VAR, "")]))
        .unwrap()
        .asset_type("nav")
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn missing_environment_key_is_a_type_mismatch() {
    let err = from_lookup(lookup(&[]))
        .unwrap()
        .asset_type("nav")
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn base_overrides_are_parsed() {
    let client = from_lookup(lookup(&[
        (API_KEY_VAR, "k"),
        (API_BASE_VAR, "http://127.0.0.1:9000/api"),
        (WS_BASE_VAR, "ws://127.0.0.1:9001"),
    ]))
    .unwrap()
    .asset_type("single_assets")
    .build()
    .unwrap();

    assert_eq!(client.catalog().api_base().as_str(), "http://127.0.0.1:9000/api");
    assert_eq!(client.catalog().ws_base().as_str(), "ws://127.0.0.1:9001/");

}

#[test]
fn malformed_base_is_an_invalid_argument_naming_the_variable() {
    let err = from_lookup(lookup(&[(API_BASE_VAR, "not a url")])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains(API_BASE_VAR), "{err}");

    let err = from_lookup(lookup(&[(API_KEY_VAR, "k"), (WS_BASE_VAR, "::")])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains(WS_BASE_VAR), "{err}");
}
