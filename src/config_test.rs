use super::config::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn clear_env() {
    unsafe {
        env::remove_var(ENV_VAR);
        env::remove_var(DATA_DIR_VAR);
        env::remove_var(DB_PATH_VAR);
        env::remove_var(DEFAULT_IMAGE_URL_VAR);
    }
}

#[test]
fn environment_parses_known_names() {
    assert_eq!("development".parse(), Ok(Environment::Development));
    assert_eq!("dev".parse(), Ok(Environment::Development));
    assert_eq!("Production".parse(), Ok(Environment::Production));
    assert_eq!("prod".parse(), Ok(Environment::Production));
    assert_eq!(" test ".parse(), Ok(Environment::Test));
}

#[test]
fn environment_rejects_unknown_name() {
    let err = "staging".parse::<Environment>().unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnknownEnvironment {
            value: "staging".to_string()
        }
    );
    assert_eq!(err.to_string(), "Unknown environment 'staging'");
}

#[test]
fn each_environment_has_its_own_database_file() {
    let dev = Environment::Development.database_file_name();
    let prod = Environment::Production.database_file_name();
    let test = Environment::Test.database_file_name();

    assert_ne!(dev, prod);
    assert_ne!(dev, test);
    assert_ne!(prod, test);
}

#[test]
fn database_path_uses_environment_file_in_data_dir() {
    let config = StorageConfig::default()
        .with_data_dir(PathBuf::from("/var/lib/notifications"))
        .with_environment(Environment::Production);

    assert_eq!(
        config.database_path(),
        PathBuf::from("/var/lib/notifications/notification.production.sqlite3")
    );
}

#[test]
fn explicit_db_path_wins_over_environment_file() {
    let config = StorageConfig::default()
        .with_environment(Environment::Test)
        .with_db_path(PathBuf::from("/tmp/custom.sqlite3"));

    assert_eq!(config.database_path(), PathBuf::from("/tmp/custom.sqlite3"));
}

#[test]
#[serial]
fn new_defaults_to_development() {
    clear_env();

    let config = StorageConfig::new().unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.db_path, None);
    assert_eq!(config.default_image_url, DEFAULT_IMAGE_URL);
}

#[test]
#[serial]
fn new_respects_env_vars() {
    clear_env();
    unsafe {
        env::set_var(ENV_VAR, "test");
        env::set_var(DATA_DIR_VAR, "/tmp/notifications-env-test");
        env::set_var(DEFAULT_IMAGE_URL_VAR, "https://example.com/icon.png");
    }

    let config = StorageConfig::new().unwrap();
    assert_eq!(config.environment, Environment::Test);
    assert_eq!(
        config.database_path(),
        PathBuf::from("/tmp/notifications-env-test/notification-test.sqlite3")
    );
    assert_eq!(config.default_image_url, "https://example.com/icon.png");

    clear_env();
}

#[test]
#[serial]
fn new_fails_on_unknown_environment() {
    clear_env();
    unsafe {
        env::set_var(ENV_VAR, "qa");
    }

    assert!(StorageConfig::new().is_err());

    clear_env();
}

#[test]
#[serial]
fn builder_overrides_env_vars() {
    clear_env();
    unsafe {
        env::set_var(ENV_VAR, "production");
        env::set_var(DB_PATH_VAR, "/tmp/from-env.sqlite3");
    }

    let config = StorageConfig::new()
        .unwrap()
        .with_environment(Environment::Test)
        .with_db_path(PathBuf::from("/tmp/from-cli.sqlite3"));

    assert_eq!(config.environment, Environment::Test);
    assert_eq!(
        config.database_path(),
        PathBuf::from("/tmp/from-cli.sqlite3"),
        "CLI flag should override env var"
    );

    clear_env();
}
