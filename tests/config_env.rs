mod support;

use support::matsel_env::MatselEnvGuard;

use matsel::config::{self, DEFAULT_API_BASE};

#[test]
fn first_launch_writes_default_config() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = MatselEnvGuard::set_config_home(temp.path().to_path_buf());

    let loaded = config::load_or_default().expect("load config");
    assert_eq!(loaded.api.base_url, DEFAULT_API_BASE);

    let path = config::config_path().expect("config path");
    assert_eq!(path, temp.path().join(".matsel").join("config.toml"));
    let text = std::fs::read_to_string(&path).expect("config written");
    assert!(text.contains("base_url"));
}

#[test]
fn environment_base_url_overrides_file() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = MatselEnvGuard::set(temp.path().to_path_buf(), Some("http://predictor.local:8000/"));

    let mut saved = config::AppConfig::default();
    saved.api.base_url = "http://10.1.1.1:5000".to_string();
    config::save(&saved).expect("save config");

    let loaded = config::load_or_default().expect("load config");
    assert_eq!(loaded.api.base_url, "http://predictor.local:8000");
}

#[test]
fn invalid_environment_base_url_is_reported() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = MatselEnvGuard::set(temp.path().to_path_buf(), Some("predictor.local"));

    let err = config::load_or_default().expect_err("invalid base rejected");
    assert!(err.to_string().contains("predictor.local"));
}

#[test]
fn explicit_base_url_skips_invalid_environment_value() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = MatselEnvGuard::set(temp.path().to_path_buf(), Some("predictor.local"));

    let loaded = config::load_with_api_base(Some("http://127.0.0.1:7000/"))
        .expect("explicit base wins");
    assert_eq!(loaded.api.base_url, "http://127.0.0.1:7000");

    let blank = config::load_with_api_base(Some("  "));
    assert!(blank.is_err(), "blank explicit base falls back to the environment");
}
