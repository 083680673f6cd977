use shop_domain::config::{
    ApiConfig, DatabaseConfig, MAX_SESSION_IDLE_SECONDS, ServerConfig, SessionConfig, StorageConfig,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.socket_addr().to_string(), "0.0.0.0:5000");
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "shop");
    assert_eq!(db.database, "store");
    assert!(db.credentials.is_none());

    let storage = StorageConfig::default();
    assert_eq!(storage.static_dir, std::path::PathBuf::from("static"));

    let session = SessionConfig::default();
    assert_eq!(session.cookie_name, "shop_session");
    assert!(!session.secure_cookie);
    assert_eq!(session.idle_ttl().as_secs(), 86_400);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "database": { "url": "mem://", "namespace": "n", "database": "d", "credentials": null },
        "storage": { "static_dir": "/tmp/static" },
        "session": { "idle_ttl_seconds": 60 },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.storage.static_dir, std::path::PathBuf::from("/tmp/static"));
    assert_eq!(cfg.session.idle_ttl(), std::time::Duration::from_secs(60));
    assert_eq!(cfg.server.socket_addr().to_string(), "[::]:8080");
    assert_eq!(cfg.session.cookie_name, "shop_session");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: ApiConfig = serde_json::from_value(json!({})).expect("empty config");
    assert_eq!(cfg.server.port, 5000);
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn huge_session_idle_ttl_is_capped() {
    let session = SessionConfig { idle_ttl_seconds: u64::MAX, ..SessionConfig::default() };
    assert_eq!(session.idle_ttl().as_secs(), MAX_SESSION_IDLE_SECONDS);
}
