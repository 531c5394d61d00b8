use scaffolder::renderer::{parse_falsy, parse_truthy, ExpressionEngine};
use serde_json::json;

fn test_template(template: &str, context: serde_json::Value, expected: &str) {
    let engine = ExpressionEngine::new();
    let result = engine.render(template, &context).unwrap();
    assert_eq!(result, expected);
}

#[test]
fn test_file_case_filter() {
    test_template(
        "[[ 'Admin/Settings Page' | file_case('class-', '.php') ]]",
        json!({}),
        "class-settings-page.php",
    );
}

#[test]
fn test_file_case_filter_without_affixes() {
    test_template("[[ 'Settings Page' | file_case ]]", json!({}), "settings-page");
}

#[test]
fn test_id_case_filter() {
    test_template("[[ 'settings page' | id_case ]]", json!({}), "Settings_Page");
}

#[test]
fn test_class_case_filter() {
    test_template("[[ 'settings page' | class_case ]]", json!({}), "SettingsPage");
}

#[test]
fn test_namespace_filter() {
    test_template(
        r"[[ 'Admin/Reports/Summary' | namespace('\\', 'Acme') ]]",
        json!({}),
        r"Acme\Admin\Reports",
    );
}

#[test]
fn test_namespace_filter_with_final_segment_only() {
    test_template(r"[[ 'Summary' | namespace('\\', 'Acme') ]]", json!({}), "Acme");
}

#[test]
fn test_case_conversion_filters() {
    test_template("[[ 'hello world' | camel_case ]]", json!({}), "helloWorld");
    test_template("[[ 'hello world' | kebab_case ]]", json!({}), "hello-world");
    test_template("[[ 'hello world' | pascal_case ]]", json!({}), "HelloWorld");
    test_template("[[ 'hello world' | snake_case ]]", json!({}), "hello_world");
}

#[test]
fn filters_compose_with_inputs() {
    test_template(
        "final class [[ inputs.name | class_case ]] {}",
        json!({"inputs": {"name": "Admin/rest controller"}}),
        "final class RestController {}",
    );
}

#[test]
fn strict_mode_rejects_undefined_variables() {
    let engine = ExpressionEngine::new();
    let result =
        engine.render("Hello, [[ inputs.typo ]]", &json!({"inputs": {"name": "World"}}));
    assert!(result.is_err(), "undefined variable must not render as empty");
}

#[test]
fn default_delimiters_are_inert() {
    test_template(
        "<h1>{{ heading }}</h1> made by [[ inputs.author ]]",
        json!({"inputs": {"author": "scaffolder"}}),
        "<h1>{{ heading }}</h1> made by scaffolder",
    );
}

#[test]
fn render_value_walks_feature_shaped_structures() {
    let engine = ExpressionEngine::new();
    let rendered = engine
        .render_value(
            &json!({
                "destination": "./inc/[[ inputs.slug ]].php",
                "args": ["--name=[[ inputs.slug ]]"],
            }),
            &json!({"inputs": {"slug": "demo"}}),
        )
        .unwrap();
    assert_eq!(
        rendered,
        json!({"destination": "./inc/demo.php", "args": ["--name=demo"]})
    );
}

#[test]
fn truthiness_table() {
    for truthy in [json!(true), json!("true"), json!("True"), json!("1")] {
        assert!(parse_truthy(&truthy), "{truthy} should be truthy");
        assert!(!parse_falsy(&truthy), "{truthy} should not be falsy");
    }
    for falsy in [json!(false), json!("false"), json!("0"), json!(""), json!("maybe")] {
        assert!(!parse_truthy(&falsy), "{falsy} should not be truthy");
        assert!(parse_falsy(&falsy), "{falsy} should be falsy");
    }
}
