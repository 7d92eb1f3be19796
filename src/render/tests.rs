//! JavaScript rendering tests

use super::*;
use crate::value::ConfigValue;
use crate::ViteGenError;

fn render(value: &ConfigValue) -> String {
    JsRenderer::new().render_value(value).unwrap()
}

#[test]
fn test_render_scalars() {
    assert_eq!(render(&ConfigValue::Null), "null");
    assert_eq!(render(&ConfigValue::Bool(true)), "true");
    assert_eq!(render(&ConfigValue::Bool(false)), "false");
    assert_eq!(render(&ConfigValue::from(42)), "42");
    assert_eq!(render(&ConfigValue::from(-7)), "-7");
    assert_eq!(render(&ConfigValue::from(3.14)), "3.14");
    assert_eq!(render(&ConfigValue::from("dist")), "\"dist\"");
}

#[test]
fn test_render_string_escaping() {
    assert_eq!(render(&ConfigValue::from("b\"c")), r#""b\"c""#);
    assert_eq!(render(&ConfigValue::from("a\\b")), r#""a\\b""#);
    assert_eq!(render(&ConfigValue::from("line1\nline2")), r#""line1\nline2""#);
    assert_eq!(render(&ConfigValue::from("tab\there")), r#""tab\there""#);
    assert_eq!(render(&ConfigValue::from("\u{1}")), r#""\u0001""#);
}

#[test]
fn test_render_raw_verbatim() {
    let value = ConfigValue::object([("plugins", ConfigValue::array([ConfigValue::raw("react()")]))]);
    let rendered = render(&value);
    assert!(rendered.contains("plugins: [react()]"), "{rendered}");
    assert!(!rendered.contains("\"react()\""), "{rendered}");
}

#[test]
fn test_render_array_inline() {
    let value = ConfigValue::array([
        ConfigValue::from("item1"),
        ConfigValue::from(42),
        ConfigValue::from(true),
    ]);
    assert_eq!(render(&value), r#"["item1", 42, true]"#);
}

#[test]
fn test_render_empty_containers() {
    assert_eq!(render(&ConfigValue::array(Vec::<ConfigValue>::new())), "[]");
    assert_eq!(
        render(&ConfigValue::object(Vec::<(String, ConfigValue)>::new())),
        "{}"
    );
}

#[test]
fn test_render_object_keys() {
    let value = ConfigValue::object([
        ("normal_key", ConfigValue::from("v1")),
        ("special-key", ConfigValue::from("v2")),
        ("$dollar", ConfigValue::from("v3")),
    ]);
    let rendered = render(&value);
    assert!(rendered.contains("normal_key: \"v1\""), "{rendered}");
    assert!(rendered.contains("\"special-key\": \"v2\""), "{rendered}");
    assert!(rendered.contains("$dollar: \"v3\""), "{rendered}");
}

#[test]
fn test_render_nested_object_indentation() {
    let value = ConfigValue::object([(
        "server",
        ConfigValue::object([("port", ConfigValue::from(3000))]),
    )]);
    assert_eq!(render(&value), "{\n  server: {\n    port: 3000\n  }\n}");
}

#[test]
fn test_render_no_trailing_comma() {
    let value = ConfigValue::object([
        ("a", ConfigValue::from(1)),
        ("b", ConfigValue::from(2)),
    ]);
    let rendered = render(&value);
    assert!(!rendered.contains(",\n}"), "{rendered}");
    assert!(rendered.contains("a: 1,\n"), "{rendered}");
}

#[test]
fn test_non_finite_number_reports_path() {
    let value = ConfigValue::object([(
        "server",
        ConfigValue::object([(
            "hmr",
            ConfigValue::object([("port", ConfigValue::from(f64::NAN))]),
        )]),
    )]);
    let err = JsRenderer::new().render_value(&value).unwrap_err();
    match err {
        ViteGenError::Serialization { path, .. } => assert_eq!(path, "server.hmr.port"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_non_finite_number_in_array_reports_path() {
    let value = ConfigValue::object([("limits", ConfigValue::array([f64::INFINITY]))]);
    let err = JsRenderer::new().render_value(&value).unwrap_err();
    match err {
        ViteGenError::Serialization { path, .. } => assert_eq!(path, "limits[0]"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_depth_guard() {
    let mut value = ConfigValue::from("leaf");
    for _ in 0..200 {
        value = ConfigValue::object([("nested", value)]);
    }
    let err = JsRenderer::new().render_value(&value).unwrap_err();
    assert!(matches!(err, ViteGenError::Serialization { .. }), "{err}");
    assert!(err.to_string().contains("maximum depth"), "{err}");
}

#[test]
fn test_render_module_layout() {
    let imports = vec![
        "import { defineConfig } from \"vite\";".to_string(),
        "import react from \"@vitejs/plugin-react\";".to_string(),
    ];
    let functions = vec![RawJs::new("function helper() {\n  return 1;\n}")];
    let config = ConfigValue::object([("plugins", ConfigValue::array([ConfigValue::raw("react()")]))]);

    let module = JsRenderer::new()
        .render_module(&imports, &functions, &config)
        .unwrap();

    assert!(module.starts_with("import { defineConfig } from \"vite\";\n"), "{module}");
    assert!(module.contains("function helper()"), "{module}");
    assert!(module.contains("export default {"), "{module}");
    assert!(module.ends_with("};\n"), "{module}");
    assert_eq!(module.matches("export default").count(), 1);
}

#[test]
fn test_render_module_dedups_imports_and_functions() {
    let imports = vec![
        "import a from \"a\";".to_string(),
        "import a from \"a\";".to_string(),
    ];
    let functions = vec![
        RawJs::new("function f() {}"),
        RawJs::new("function f() {}"),
    ];
    let module = JsRenderer::new()
        .render_module(&imports, &functions, &ConfigValue::Null)
        .unwrap();

    assert_eq!(module.matches("import a from \"a\";").count(), 1, "{module}");
    assert_eq!(module.matches("function f() {}").count(), 1, "{module}");
}

#[test]
fn test_render_module_without_imports_or_functions() {
    let module = JsRenderer::new()
        .render_module(&[], &[], &ConfigValue::object([("base", ConfigValue::from("/"))]))
        .unwrap();
    assert!(module.starts_with("\nexport default {"), "{module}");
}
