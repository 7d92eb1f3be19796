//! Configuration value tests

use super::*;

#[test]
fn test_raw_js_payload() {
    let raw = RawJs::new("console.log('hello')");
    assert_eq!(raw.code(), "console.log('hello')");

    let empty = RawJs::new("");
    assert_eq!(empty.code(), "");
}

#[test]
fn test_scalar_conversions() {
    assert_eq!(ConfigValue::from(true), ConfigValue::Bool(true));
    assert_eq!(
        ConfigValue::from(42),
        ConfigValue::Number(Number::Int(42))
    );
    assert_eq!(
        ConfigValue::from(3.14),
        ConfigValue::Number(Number::Float(3.14))
    );
    assert_eq!(
        ConfigValue::from("dist"),
        ConfigValue::String("dist".to_string())
    );
    assert_eq!(ConfigValue::from(None::<bool>), ConfigValue::Null);
    assert_eq!(ConfigValue::from(Some(1)), ConfigValue::from(1));
}

#[test]
fn test_vec_conversion() {
    let value = ConfigValue::from(vec!["a", "b"]);
    assert_eq!(value, ConfigValue::array(["a", "b"]));
}

#[test]
fn test_object_constructor() {
    let value = ConfigValue::object([("port", ConfigValue::from(3000))]);
    assert_eq!(value.get("port"), Some(&ConfigValue::from(3000)));
    assert_eq!(value.get("host"), None);
    assert!(value.is_object());
}

#[test]
fn test_from_json_str_basic() {
    let value =
        ConfigValue::from_json_str(r#"{"server": {"port": 3000, "open": true}, "base": "/"}"#)
            .unwrap();
    let server = value.get("server").unwrap();
    assert_eq!(server.get("port"), Some(&ConfigValue::from(3000)));
    assert_eq!(server.get("open"), Some(&ConfigValue::Bool(true)));
    assert_eq!(value.get("base").and_then(ConfigValue::as_str), Some("/"));
}

#[test]
fn test_from_json_raw_marker() {
    let value = ConfigValue::from_json_str(r#"{"plugins": [{"$raw": "react()"}]}"#).unwrap();
    assert_eq!(
        value.get("plugins"),
        Some(&ConfigValue::array([ConfigValue::raw("react()")]))
    );
}

#[test]
fn test_from_json_raw_marker_bad_payload() {
    let err = ConfigValue::from_json_str(r#"{"plugins": [{"$raw": 42}]}"#).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("plugins[0].$raw"), "{message}");
    assert!(message.contains("must be a string"), "{message}");
}

#[test]
fn test_from_json_raw_marker_needs_single_key() {
    // An object that merely contains "$raw" among other keys is a plain
    // object, not a marker.
    let value =
        ConfigValue::from_json_str(r#"{"x": {"$raw": "react()", "other": 1}}"#).unwrap();
    let inner = value.get("x").unwrap();
    assert!(inner.is_object());
    assert_eq!(inner.get(RAW_MARKER_KEY), Some(&ConfigValue::from("react()")));
}

#[test]
fn test_from_json_invalid_document() {
    assert!(ConfigValue::from_json_str("{not json").is_err());
}
