use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tfdemo::resolver::BindingSource;
use tfdemo::{
    AttributeValue, ConfigError, Configuration, DeclarationError, VariableSpec, render, resolve,
    resolve_all,
};

fn demo_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/main.tf.json")
}

#[test]
fn test_demo_config_loads() {
    let config = Configuration::from_file(&demo_config()).unwrap();

    let dummy = config.provider("dummy").unwrap();
    assert_eq!(dummy.version, "1.0.0");
    assert_eq!(dummy.source.as_deref(), Some("example/dummy"));

    let server = config.resources.lookup("dummy_server", "web").unwrap();
    assert_eq!(server["instance_count"], AttributeValue::Integer(2));

    let db = config.resources.lookup("dummy_database", "db").unwrap();
    assert_eq!(db["engine"], AttributeValue::String("postgres".to_string()));
}

#[test]
fn test_duplicate_in_file_aborts_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dup.tf.json");
    fs::write(
        &path,
        r#"{
            "resource": [
                { "dummy_server": { "web": { "name": "first" } } },
                { "dummy_database": { "db": {} } },
                { "dummy_server": { "web": { "name": "second" } } }
            ]
        }"#,
    )
    .unwrap();

    match Configuration::from_file(&path) {
        Err(ConfigError::Declaration(DeclarationError::Duplicate { kind, name })) => {
            assert_eq!(kind, "dummy_server");
            assert_eq!(name, "web");
        }
        other => panic!("expected duplicate declaration error, got {other:?}"),
    }
}

#[test]
fn test_resolver_scenarios() {
    let empty: HashMap<String, String> = HashMap::new();
    let staging: HashMap<String, String> =
        HashMap::from([("VAR1".to_string(), "staging".to_string())]);
    let no_args: [&str; 0] = [];

    assert_eq!(resolve(&["1.2.3", "prod"], &staging, "VERSION", 0), "1.2.3");
    assert_eq!(resolve(&no_args, &staging, "VAR1", 0), "staging");
    assert_eq!(resolve(&no_args, &empty, "VAR1", 0), "");
}

#[test]
fn test_resolved_bindings_render_message() {
    let env: HashMap<String, String> = HashMap::from([("VAR2".to_string(), "eu".to_string())]);
    let specs = [VariableSpec::new("VAR1", 0), VariableSpec::new("VAR2", 1)];
    let bindings = resolve_all(&specs, &["v2"], &env);

    assert_eq!(bindings[0].source, BindingSource::Positional);
    assert_eq!(bindings[1].source, BindingSource::Environment);

    let values = tfdemo::resolver::bindings_map(&bindings);
    assert_eq!(
        render("deploying ${VAR1} to $VAR2 (${VAR3})", &values),
        "deploying v2 to eu ()"
    );
}
