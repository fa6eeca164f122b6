//! Browser tests for the page parameter bridge
#![cfg(target_arch = "wasm32")]

use page_params_wasm::{configure, get_parameter, parameters_json, refresh_parameters};
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn set_search(search: &str) {
    let window = web_sys::window().unwrap();
    window
        .history()
        .unwrap()
        .replace_state_with_url(&JsValue::NULL, "", Some(&format!("?{search}")))
        .unwrap();
}

fn window_global(name: &str, key: &str) -> JsValue {
    let window = web_sys::window().unwrap();
    let global = js_sys::Reflect::get(&window, &JsValue::from_str(name)).unwrap();
    js_sys::Reflect::get(&global, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn test_publishes_window_parameters() {
    set_search("a=1&b=2");
    configure("{}").unwrap();

    assert_eq!(get_parameter("a").as_deref(), Some("1"));
    assert_eq!(window_global("parameters", "b").as_string().as_deref(), Some("2"));
    assert!(window_global("parameters", "missing").is_undefined());
}

#[wasm_bindgen_test]
fn test_popstate_refreshes() {
    set_search("a=1");
    configure("{}").unwrap();

    set_search("name=John+Smith&x=%2F%3F");
    let window = web_sys::window().unwrap();
    window
        .dispatch_event(&web_sys::Event::new("popstate").unwrap())
        .unwrap();

    assert_eq!(get_parameter("name").as_deref(), Some("John Smith"));
    assert_eq!(get_parameter("x").as_deref(), Some("/?"));
    assert_eq!(get_parameter("a"), None);
}

#[wasm_bindgen_test]
fn test_malformed_escape_is_thrown() {
    set_search("a=1");
    configure("{}").unwrap();

    set_search("a=1&bad=%E&c=3");
    assert!(refresh_parameters().is_err());

    assert_eq!(get_parameter("a").as_deref(), Some("1"));
    assert_eq!(get_parameter("c"), None);
    assert!(window_global("parameters", "c").is_undefined());
}

#[wasm_bindgen_test]
fn test_custom_global_name() {
    set_search("q=rust");
    configure(r#"{"globalName":"queryParams"}"#).unwrap();

    assert_eq!(window_global("queryParams", "q").as_string().as_deref(), Some("rust"));
    assert!(parameters_json().contains("rust"));

    configure("{}").unwrap();
    let window = web_sys::window().unwrap();
    let old = js_sys::Reflect::get(&window, &JsValue::from_str("queryParams")).unwrap();
    assert!(old.is_undefined());
}

#[wasm_bindgen_test]
fn test_invalid_config_rejected() {
    assert!(configure(r#"{"globalName":""}"#).is_err());
}
