use std::{fs, io, path::Path, str::FromStr, time::Duration};

use anyhow::Context;
use booking_core::{ProofPolicy, WizardOptions};
use chrono::NaiveDate;
use page_ui::UiOptions;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "booking.toml";
const ENV_PREFIX: &str = "APP__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub home_path: String,
    pub leave_redirect_path: String,
    pub booking_id_prefix: String,
    pub proof_policy: ProofPolicy,
    pub notification_duration_ms: u64,
    pub submit_safety_timeout_ms: u64,
    pub scroll_threshold: f64,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let ui = UiOptions::default();
        Self {
            home_path: ui.wizard.home_path,
            leave_redirect_path: ui.leave_redirect_path,
            booking_id_prefix: ui.wizard.booking_id_prefix,
            proof_policy: ui.wizard.proof_policy,
            notification_duration_ms: millis(ui.notification_duration),
            submit_safety_timeout_ms: millis(ui.submit_safety_timeout),
            scroll_threshold: ui.scroll_threshold,
            debug: false,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Settings {
    pub fn ui_options(&self, today: Option<NaiveDate>) -> UiOptions {
        UiOptions {
            wizard: WizardOptions {
                proof_policy: self.proof_policy,
                booking_id_prefix: self.booking_id_prefix.clone(),
                home_path: self.home_path.clone(),
            },
            notification_duration: Duration::from_millis(self.notification_duration_ms),
            submit_safety_timeout: Duration::from_millis(self.submit_safety_timeout_ms),
            scroll_threshold: self.scroll_threshold,
            leave_redirect_path: self.leave_redirect_path.clone(),
            today,
        }
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file if present, then `APP__*` variables.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };

    let var = |key: &str| env(&format!("{ENV_PREFIX}{key}"));

    if let Some(v) = var("HOME_PATH") {
        settings.home_path = v;
    }
    if let Some(v) = var("LEAVE_REDIRECT_PATH") {
        settings.leave_redirect_path = v;
    }
    if let Some(v) = var("BOOKING_ID_PREFIX") {
        settings.booking_id_prefix = v;
    }
    if let Some(v) = var("PROOF_POLICY") {
        settings.proof_policy = parse_var("PROOF_POLICY", &v)?;
    }
    if let Some(v) = var("NOTIFICATION_DURATION_MS") {
        settings.notification_duration_ms = parse_var("NOTIFICATION_DURATION_MS", &v)?;
    }
    if let Some(v) = var("SUBMIT_SAFETY_TIMEOUT_MS") {
        settings.submit_safety_timeout_ms = parse_var("SUBMIT_SAFETY_TIMEOUT_MS", &v)?;
    }
    if let Some(v) = var("SCROLL_THRESHOLD") {
        settings.scroll_threshold = parse_var("SCROLL_THRESHOLD", &v)?;
    }
    if let Some(v) = var("DEBUG") {
        settings.debug = parse_var("DEBUG", &v)?;
    }

    Ok(settings)
}

fn parse_var<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("{ENV_PREFIX}{key} has an invalid value '{value}'"))
}
