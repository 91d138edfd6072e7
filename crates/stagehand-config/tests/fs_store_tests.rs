// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use stagehand_config::{
    ConfigError, ConfigService, ConfigStore, FsConfigStore, ServicePrefs, SERVICE_PREFS_KEY,
};

#[test]
fn missing_key_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::with_root(dir.path()).unwrap();
    assert!(matches!(
        store.load_raw("absent"),
        Err(ConfigError::NotFound)
    ));
}

#[test]
fn with_root_creates_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("a").join("b");
    let store = FsConfigStore::with_root(&root).unwrap();
    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}

#[test]
fn prefs_persist_as_pretty_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let svc = ConfigService::new(FsConfigStore::with_root(dir.path()).unwrap());
    let prefs = ServicePrefs {
        listen: "0.0.0.0:9001".parse().unwrap(),
        max_message_bytes: 4096,
    };
    svc.save(SERVICE_PREFS_KEY, &prefs).unwrap();

    let text = std::fs::read_to_string(dir.path().join("service.json")).unwrap();
    assert!(text.contains("\"listen\": \"0.0.0.0:9001\""));

    let loaded: Option<ServicePrefs> = svc.load(SERVICE_PREFS_KEY).unwrap();
    assert_eq!(loaded, Some(prefs));
}

#[test]
fn load_or_init_keeps_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("service.json"),
        r#"{"listen":"127.0.0.1:7000","max_message_bytes":10}"#,
    )
    .unwrap();
    let svc = ConfigService::new(FsConfigStore::with_root(dir.path()).unwrap());

    let prefs: ServicePrefs = svc.load_or_init(SERVICE_PREFS_KEY).unwrap();
    assert_eq!(prefs.max_message_bytes, 10);
    let text = std::fs::read_to_string(dir.path().join("service.json")).unwrap();
    assert!(text.contains("\"max_message_bytes\":10"));
}
