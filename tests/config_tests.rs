// Configuration tests - verify file loading, defaults and validation

use std::fs;
use topicd::application::config::loader::ConfigLoader;

#[test]
fn test_valid_config_file() {
    let toml_content = r#"
client_timeout_secs = 15
client_max_body_size = 65536
log_level = "debug"

[server]
address = "127.0.0.1"
port = 9090

[database]
connection_string = "memory://"
name = "comments"

[cors]
allowed_origins = ["https://allowed.test"]

[auth]
jwt_secret = "file-secret"
cookie_name = "session"
admin_user_ids = ["admin"]
"#;

    let temp_file = std::env::temp_dir().join("topicd_test_config.toml");
    fs::write(&temp_file, toml_content).unwrap();

    let config = ConfigLoader::load(Some(&temp_file)).unwrap();
    assert_eq!(config.client_timeout_secs, 15);
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.auth.cookie_name, "session");
    assert_eq!(config.cors.allowed_origins, vec!["https://allowed.test".to_string()]);
}

#[test]
fn test_missing_config_file() {
    let missing = std::env::temp_dir().join("topicd_does_not_exist.toml");
    let _ = fs::remove_file(&missing);

    let err = ConfigLoader::load(Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_unparseable_config() {
    assert!(ConfigLoader::load_from_str("[server\nport = 1").is_err());
}

#[test]
fn test_secret_is_required() {
    assert!(ConfigLoader::load_from_str("").is_err());
    assert!(ConfigLoader::load_from_str("[auth]\njwt_secret = \"x\"").is_ok());
}

#[test]
fn test_unknown_scheme_passes_validation() {
    // Scheme support is decided when the backend is opened
    let config = ConfigLoader::load_from_str(
        r#"
[database]
connection_string = "postgres://db"

[auth]
jwt_secret = "x"
"#,
    )
    .unwrap();
    assert_eq!(config.database.connection_string, "postgres://db");
}

#[tokio::test]
async fn test_unknown_scheme_is_rejected_on_connect() {
    let mut config = ConfigLoader::load_from_str("[auth]\njwt_secret = \"x\"").unwrap();
    config.database.connection_string = "postgres://db".to_string();

    let result = topicd::application::service::connect(&config.database, &config.auth).await;
    let err = result.err().unwrap();
    assert!(err.to_string().contains("postgres"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        "client_timeout_secs = 0\n[auth]\njwt_secret = \"x\"",
        "client_max_body_size = 0\n[auth]\njwt_secret = \"x\"",
        "[database]\nname = \"\"\n[auth]\njwt_secret = \"x\"",
        "[cors]\nallowed_origins = [\" \"]\n[auth]\njwt_secret = \"x\"",
        "[auth]\njwt_secret = \"x\"\ncookie_name = \"a;b\"",
    ];

    for case in cases {
        assert!(ConfigLoader::load_from_str(case).is_err(), "accepted: {}", case);
    }
}
