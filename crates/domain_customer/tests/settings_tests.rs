//! Tests for loading identity store settings from files and the environment

use std::fs;
use std::path::PathBuf;

use core_kernel::ExternalAuthConfig;
use domain_customer::{IdentityStoreSettings, SettingsError};

fn write_settings(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

// Runs as a single test: environment variables are process-wide.
#[test]
fn test_file_then_environment_precedence() {
    let path = write_settings(
        "identitystore-settings",
        r#"
        base_url = "https://identity.example.org/rest/identitystore/v1"
        application_code = "FromFile"

        [auth]
        type = "api_key"
        header_name = "X-Api-Key"
        key = "k"

        [attributes]
        given_name = "user.name.given"
        email = "user.home-info.online.email"
        "#,
    );

    let from_file = IdentityStoreSettings::load_from(Some(&path)).unwrap();
    assert_eq!(from_file.application_code, "FromFile");
    assert_eq!(from_file.attributes.given_name, "user.name.given");
    assert_eq!(from_file.attributes.family_name, "family_name");
    assert_eq!(
        from_file.auth,
        ExternalAuthConfig::ApiKey { header_name: "X-Api-Key".to_string(), key: "k".to_string() }
    );

    std::env::set_var("CUSTOMERPROVISIONING__APPLICATION_CODE", "FromEnv");
    std::env::set_var("CUSTOMERPROVISIONING__ATTRIBUTES__MOBILE_PHONE", "user.home-info.telecom.mobile.number");
    let overridden = IdentityStoreSettings::load_from(Some(&path));
    std::env::remove_var("CUSTOMERPROVISIONING__APPLICATION_CODE");
    std::env::remove_var("CUSTOMERPROVISIONING__ATTRIBUTES__MOBILE_PHONE");

    let overridden = overridden.unwrap();
    assert_eq!(overridden.application_code, "FromEnv");
    assert_eq!(overridden.attributes.mobile_phone, "user.home-info.telecom.mobile.number");
    assert_eq!(overridden.base_url, "https://identity.example.org/rest/identitystore/v1");

    fs::remove_file(path).ok();
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let path = std::env::temp_dir().join("identitystore-settings-does-not-exist.toml");
    let result = IdentityStoreSettings::load_from(Some(&path));
    assert!(matches!(result, Err(SettingsError::Load(_))));
}

#[test]
fn test_invalid_file_is_rejected() {
    let path = write_settings(
        "identitystore-settings-invalid",
        r#"
        [attributes]
        given_name = ""
        "#,
    );

    let result = IdentityStoreSettings::load_from(Some(&path));
    fs::remove_file(&path).ok();

    assert!(matches!(result, Err(SettingsError::Invalid(_))));
}
