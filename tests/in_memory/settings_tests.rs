//! Settings layering against the process environment.

use std::fs;
use std::time::Duration;

use rstest::rstest;
use tasklight::{
    settings::{AppSettings, SETTINGS_PATH_VAR, SettingsError},
    todo::services::EmptyListPolicy,
};

use crate::test_helpers::EnvOverrides;

#[rstest]
fn environment_overrides_nested_keys() -> Result<(), SettingsError> {
    let _env = EnvOverrides::apply(&[
        ("TASKLIGHT__STORE__KEY_PREFIX", Some("tasks")),
        ("TASKLIGHT__STORE__PERSIST_EMPTY", Some("true")),
        ("TASKLIGHT__SWEEP__INTERVAL_SECS", Some("15")),
        ("TASKLIGHT__SESSION__USER_ID", Some("carol")),
    ]);

    let settings = AppSettings::from_toml_str("[store]\nkey_prefix = \"ignored\"")?;

    assert_eq!(settings.store.key_prefix, "tasks");
    assert_eq!(settings.sweep_interval(), Duration::from_secs(15));
    assert_eq!(
        settings.session_settings()?.empty_list_policy,
        EmptyListPolicy::Overwrite
    );
    assert_eq!(
        settings.session_user()?.map(|user| user.as_str().to_owned()),
        Some("carol".to_owned())
    );
    Ok(())
}

#[rstest]
fn explicit_settings_file_is_loaded() -> eyre::Result<()> {
    let path = std::env::temp_dir().join(format!("tasklight-{}.toml", std::process::id()));
    fs::write(
        &path,
        "[sweep]\nreminder_window_secs = 120\n\n[log]\nfilter = \"tasklight=debug\"\n",
    )?;
    let path_value = path.to_string_lossy().into_owned();
    let _env = EnvOverrides::apply(&[(SETTINGS_PATH_VAR, Some(&path_value))]);

    let loaded = AppSettings::load();
    fs::remove_file(&path)?;
    let settings = loaded?;

    eyre::ensure!(settings.sweep.reminder_window_secs == 120);
    eyre::ensure!(settings.log.filter == "tasklight=debug");
    eyre::ensure!(settings.store.ttl_secs == 86_400);
    Ok(())
}

#[rstest]
fn missing_explicit_settings_file_is_an_error() {
    let _env = EnvOverrides::apply(&[(
        SETTINGS_PATH_VAR,
        Some("/nonexistent/tasklight-settings.toml"),
    )]);

    assert!(matches!(AppSettings::load(), Err(SettingsError::Load(_))));
}

#[rstest]
fn invalid_environment_value_is_rejected() {
    let _env = EnvOverrides::apply(&[("TASKLIGHT__SWEEP__REMINDER_WINDOW_SECS", Some("0"))]);

    assert!(matches!(
        AppSettings::from_toml_str(""),
        Err(SettingsError::Invalid {
            key: "sweep.reminder_window_secs",
            ..
        })
    ));
}
