//! Configuration tests
//!
//! Round-trip tests guard the hand-written TOML template: every field
//! written by `to_toml()` must parse back to the same value.

use super::*;
use crate::copy::ClipboardBackend;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed = FileConfig::parse(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(resolved.theme, config.theme);
    assert_eq!(resolved.copy, config.copy);
    assert_eq!(resolved.logging, config.logging);
    assert!(resolved.entries.is_empty());
}

/// Non-default values, including characters TOML needs escaped
#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.theme = "light".to_string();
    config.copy.reset_delay_ms = 750;
    config.copy.success_label = "Got it \"boss\"".to_string();
    config.copy.failure_message = "No clipboard\\here".to_string();
    config.copy.clipboard = ClipboardBackend::Osc52;
    config.logging.level = "debug".to_string();
    config.logging.file = Some(LogFile {
        dir: std::path::PathBuf::from("/tmp/clip flash/logs"),
        rotation: LogRotation::Hourly,
        prefix: "flash".to_string(),
    });
    config.entries = vec![
        EntryConfig {
            name: Some("treasury".to_string()),
            value: "GAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7".to_string(),
        },
        EntryConfig {
            name: None,
            value: "51234567".to_string(),
        },
    ];

    let toml_str = config.to_toml();
    let parsed = FileConfig::parse(&toml_str).unwrap_or_else(|e| {
        panic!("Customized config should parse.\nTOML:\n{}\nError: {}", toml_str, e)
    });
    let resolved = Config::resolve(parsed, no_env);

    assert_eq!(resolved.theme, "light");
    assert_eq!(resolved.copy, config.copy);
    assert_eq!(resolved.logging, config.logging);
    assert_eq!(resolved.entries, config.entries);
}

/// Labels with characters Rust and TOML escape differently
#[test]
fn test_config_roundtrip_unusual_characters() {
    let mut config = Config::default();
    config.copy.success_label = "Copied\u{200b}!".to_string();
    config.copy.failure_message = "Bell\u{7} tab\t quote' \"both\"".to_string();
    config.entries = vec![EntryConfig {
        name: Some("zero\u{200b}width".to_string()),
        value: "line\u{1b}[0m".to_string(),
    }];

    let toml_str = config.to_toml();
    let parsed = FileConfig::parse(&toml_str).unwrap_or_else(|e| {
        panic!("Config with escapes should parse.\nTOML:\n{}\nError: {}", toml_str, e)
    });
    let resolved = Config::resolve(parsed, no_env);

    assert_eq!(resolved.copy.success_label, "Copied\u{200b}!");
    assert_eq!(resolved.copy.failure_message, config.copy.failure_message);
    assert_eq!(resolved.entries, config.entries);
}

// ─────────────────────────────────────────────────────────────────────────────
// Layering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_gives_defaults() {
    let config = Config::resolve(FileConfig::parse("").unwrap(), no_env);
    assert_eq!(config.copy.reset_delay_ms, 2000);
    assert_eq!(config.copy.success_label, "Copied to clipboard");
    assert_eq!(config.copy.failure_message, "Failed to copy");
    assert_eq!(config.copy.clipboard, ClipboardBackend::System);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_env_overrides_file() {
    let file = FileConfig::parse(
        r#"
theme = "light"

[copy]
reset_delay_ms = 500
clipboard = "system"

[logging]
level = "warn"
"#,
    )
    .unwrap();

    let env = env_from(&[
        ("CLIPFLASH_THEME", "dark"),
        ("CLIPFLASH_CLIPBOARD", "osc52"),
        ("CLIPFLASH_RESET_DELAY_MS", "3000"),
        ("CLIPFLASH_LOG_LEVEL", "debug"),
    ]);
    let config = Config::resolve(file, env);

    assert_eq!(config.theme, "dark");
    assert_eq!(config.copy.clipboard, ClipboardBackend::Osc52);
    assert_eq!(config.copy.reset_delay_ms, 3000);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_unparseable_env_delay_keeps_file_value() {
    let file = FileConfig::parse("[copy]\nreset_delay_ms = 500\n").unwrap();
    let config = Config::resolve(file, env_from(&[("CLIPFLASH_RESET_DELAY_MS", "soon")]));
    assert_eq!(config.copy.reset_delay_ms, 500);
}

#[test]
fn test_blank_labels_fall_back_to_defaults() {
    let file = FileConfig::parse("[copy]\nsuccess_label = \"  \"\nfailure_message = \"\"\n")
        .unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.copy.success_label, "Copied to clipboard");
    assert_eq!(config.copy.failure_message, "Failed to copy");
}

#[test]
fn test_blank_entries_are_dropped() {
    let file = FileConfig::parse(
        r#"
[[entries]]
name = "empty"
value = "   "

[[entries]]
value = "native"
"#,
    )
    .unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.entries.len(), 1);
    assert_eq!(config.entries[0].to_entry().kind, crate::entries::EntryKind::Asset);
}

#[test]
fn test_entry_without_value_is_a_parse_error() {
    assert!(FileConfig::parse("[[entries]]\nname = \"oops\"\n").is_err());
}

#[test]
fn test_copy_settings_conversion() {
    let mut copy = CopyConfig::default();
    copy.reset_delay_ms = 1234;
    let settings = copy.settings();
    assert_eq!(settings.reset_delay, std::time::Duration::from_millis(1234));
    assert_eq!(settings.success_label, copy.success_label);
    assert_eq!(copy.toast_duration(), std::time::Duration::from_millis(2000));
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging section
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_log_file_table_turns_file_logging_on() {
    let file = FileConfig::parse(
        r#"
[logging]
level = "WARN"

[logging.file]
rotation = "never"
"#,
    )
    .unwrap();
    let config = Config::resolve(file, no_env);

    assert_eq!(config.logging.level, "warn");
    let log_file = config.logging.file.expect("file logging on");
    assert_eq!(log_file.rotation, LogRotation::Never);
    assert_eq!(log_file.prefix, "clipflash");
    assert_eq!(log_file.dir, observability::default_log_dir());
}

#[test]
fn test_no_log_file_table_means_no_file() {
    let config = Config::resolve(FileConfig::parse("[logging]\n").unwrap(), no_env);
    assert_eq!(config.logging.file, None);
}

#[test]
fn test_unknown_rotation_is_a_parse_error() {
    assert!(FileConfig::parse("[logging.file]\nrotation = \"weekly\"\n").is_err());
}

#[test]
fn test_unknown_clipboard_is_a_parse_error() {
    assert!(FileConfig::parse("[copy]\nclipboard = \"pasteboard\"\n").is_err());
}

#[test]
fn test_unknown_levels_fall_back_to_info() {
    let file = FileConfig::parse("[logging]\nlevel = \"loud\"\n").unwrap();
    let config = Config::resolve(file, env_from(&[("CLIPFLASH_LOG_LEVEL", "louder")]));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_env_log_dir_turns_file_logging_on() {
    let file = FileConfig::parse("[logging.file]\nrotation = \"hourly\"\n").unwrap();
    let config = Config::resolve(file, env_from(&[("CLIPFLASH_LOG_DIR", "/var/log/clipflash")]));

    let log_file = config.logging.file.unwrap();
    assert_eq!(log_file.dir, std::path::PathBuf::from("/var/log/clipflash"));
    assert_eq!(log_file.rotation, LogRotation::Hourly);
}

#[test]
fn test_invalid_env_clipboard_keeps_file_value() {
    let file = FileConfig::parse("[copy]\nclipboard = \"osc52\"\n").unwrap();
    let config = Config::resolve(file, env_from(&[("CLIPFLASH_CLIPBOARD", "bogus")]));
    assert_eq!(config.copy.clipboard, ClipboardBackend::Osc52);
}
