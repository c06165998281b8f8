use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn env_overrides_defaults() {
    let mut settings = ClientSettings::default();
    apply_env_settings(
        &mut settings,
        env_from(&[
            ("ROSTER_SERVER_URL", "http://roster.local"),
            ("APP__REQUEST_TIMEOUT_SECS", "5"),
            ("APP__DISPLAY_UTC_OFFSET_MINUTES", "-300"),
        ]),
    );
    assert_eq!(settings.server_url, "http://roster.local");
    assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    assert_eq!(settings.display_offset().local_minus_utc(), -300 * 60);
}

#[test]
fn app_prefixed_url_wins_over_legacy_name() {
    let mut settings = ClientSettings::default();
    apply_env_settings(
        &mut settings,
        env_from(&[
            ("ROSTER_SERVER_URL", "http://legacy"),
            ("APP__SERVER_URL", "http://preferred"),
        ]),
    );
    assert_eq!(settings.server_url, "http://preferred");
}

#[test]
fn unparsable_numbers_are_ignored() {
    let mut settings = ClientSettings::default();
    apply_env_settings(
        &mut settings,
        env_from(&[
            ("APP__MAX_REDIRECTS", "lots"),
            ("APP__REQUEST_TIMEOUT_SECS", "-1"),
        ]),
    );
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn out_of_range_offset_falls_back_to_utc() {
    let settings = ClientSettings {
        display_utc_offset_minutes: 100_000,
        ..ClientSettings::default()
    };
    assert_eq!(settings.display_offset().local_minus_utc(), 0);
}

#[test]
fn reads_partial_settings_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("roster_settings_test_{suffix}.toml"));
    fs::write(&path, "server_url = \"http://file.local\"\nmax_redirects = 2\n").expect("write");

    let file_cfg = read_settings_file(&path)
        .expect("read")
        .expect("file present");
    let mut settings = ClientSettings::default();
    apply_file_settings(&mut settings, file_cfg);

    assert_eq!(settings.server_url, "http://file.local");
    assert_eq!(settings.max_redirects, 2);
    assert_eq!(settings.request_timeout_secs, 30);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn missing_settings_file_is_not_an_error() {
    let path = env::temp_dir().join("roster_settings_definitely_missing.toml");
    assert!(read_settings_file(&path).expect("read").is_none());
}

#[test]
fn malformed_settings_file_reports_path_and_cause() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("roster_settings_bad_{suffix}.toml"));
    fs::write(&path, "max_redirects = \"many\"\n").expect("write");

    let err = read_settings_file(&path).expect_err("must fail");
    let logged = format!("{err:#}");
    assert!(logged.starts_with("failed to parse settings file"));
    assert!(logged.contains("max_redirects"));

    fs::remove_file(path).expect("cleanup");
}
