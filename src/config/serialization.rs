//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::observability::default_log_dir;
use super::Config;
use std::path::Path;

/// TOML string literal for `s`, escaped the way the parser expects
fn toml_quote(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

fn toml_quote_path(path: &Path) -> String {
    toml_quote(&path.display().to_string())
}

impl Config {
    /// Serialize saved entries to `[[entries]]` items
    pub(super) fn entries_to_toml(&self) -> String {
        if self.entries.is_empty() {
            // Show example comments when no entries are saved
            return r#"
# [[entries]]
# name = "treasury"
# value = "GAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7"
#
# [[entries]]
# value = "3389e9f0f1a65f19736cacf544c2e825313e8447f569233bb8db39aa607c8889"
"#
            .to_string();
        }

        let mut output = String::from("\n");
        for entry in &self.entries {
            output.push_str("[[entries]]\n");
            if let Some(name) = &entry.name {
                output.push_str(&format!("name = {}\n", toml_quote(name)));
            }
            output.push_str(&format!("value = {}\n\n", toml_quote(&entry.value)));
        }
        output
    }

    /// `[logging.file]`, commented out while file logging is off
    pub(super) fn log_file_to_toml(&self) -> String {
        match &self.logging.file {
            Some(file) => format!(
                r#"
# JSON log file (env: CLIPFLASH_LOG_DIR); remove this table to turn it off
[logging.file]
dir = {dir}
# hourly, daily, never
rotation = "{rotation}"
prefix = {prefix}
"#,
                dir = toml_quote_path(&file.dir),
                rotation = file.rotation,
                prefix = toml_quote(&file.prefix),
            ),
            None => format!(
                r#"
# JSON log file (env: CLIPFLASH_LOG_DIR); uncomment to turn it on
# [logging.file]
# dir = {dir}
# rotation = "daily"
# prefix = "clipflash"
"#,
                dir = toml_quote_path(&default_log_dir()),
            ),
        }
    }

    /// Render the full config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# clipflash configuration
# Precedence: environment variables > this file > built-in defaults

# Theme: "dark" or "light" (env: CLIPFLASH_THEME)
theme = {theme}

[copy]
# How long the copied indicator stays on, in milliseconds (env: CLIPFLASH_RESET_DELAY_MS)
reset_delay_ms = {reset_delay_ms}
# Toast shown after a copy when no kind-specific label applies
success_label = {success_label}
# Toast shown when the clipboard could not be written
failure_message = {failure_message}
# How long toasts stay on screen, in milliseconds
toast_duration_ms = {toast_duration_ms}
# "system" (native clipboard) or "osc52" (terminal, works over SSH) (env: CLIPFLASH_CLIPBOARD)
clipboard = "{clipboard}"

[logging]
# trace, debug, info, warn, error (env: CLIPFLASH_LOG_LEVEL, RUST_LOG overrides both)
level = {level}
{log_file}{entries}"#,
            theme = toml_quote(&self.theme),
            reset_delay_ms = self.copy.reset_delay_ms,
            success_label = toml_quote(&self.copy.success_label),
            failure_message = toml_quote(&self.copy.failure_message),
            toast_duration_ms = self.copy.toast_duration_ms,
            clipboard = self.copy.clipboard.as_str(),
            level = toml_quote(&self.logging.level),
            log_file = self.log_file_to_toml(),
            entries = self.entries_to_toml(),
        )
    }
}
