use revlane::config::{Config, Overrides, BASE_URL_ENV};
use revlane::env::RealEnv;
use serial_test::serial;

#[test]
#[serial]
fn test_base_url_from_process_env() {
    std::env::set_var(BASE_URL_ENV, "http://from-env:8080/revenue");
    let config = Config::load(&RealEnv, &Overrides::default());
    std::env::remove_var(BASE_URL_ENV);

    assert_eq!(config.unwrap().base_url, "http://from-env:8080/revenue/");
}

#[test]
#[serial]
fn test_flag_beats_process_env() {
    std::env::set_var(BASE_URL_ENV, "http://from-env/");
    let overrides = Overrides {
        base_url: Some("http://from-flag/".into()),
        ..Overrides::default()
    };
    let config = Config::load(&RealEnv, &overrides);
    std::env::remove_var(BASE_URL_ENV);

    assert_eq!(config.unwrap().base_url, "http://from-flag/");
}
