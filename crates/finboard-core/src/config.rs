use std::collections::BTreeSet;

use anyhow::Context;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{
  info,
  warn
};

use crate::nav::{
  InitStrategy,
  NavMode
};

pub const DEFAULT_TIMEZONE: &str =
  "America/Sao_Paulo";
pub const DEFAULT_API_BASE: &str =
  "/invoices/api";
pub const DEFAULT_TOAST_DELAY_MS: u32 =
  3_000;
pub const CALENDAR_PAGE_CLASS: &str =
  "calendar-page";
pub const LEGACY_RELOAD_HOOKS: [&str;
  4] = [
  "loadInvoices",
  "loadCards",
  "loadBills",
  "loadDashboard"
];

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct UiConfig {
  pub version:      u32,
  pub timezone:     String,
  pub api:          ApiConfig,
  pub toast:        ToastConfig,
  pub temporal_nav: TemporalNavConfig
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ApiConfig {
  pub base: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ToastConfig {
  pub delay_ms: u32
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct TemporalNavConfig {
  pub mode:                NavMode,
  pub init:                InitStrategy,
  pub skip_body_classes:   Vec<String>,
  pub skip_path_prefixes:  Vec<String>,
  pub legacy_reload_hooks: Vec<String>
}

impl Default for UiConfig {
  fn default() -> Self {
    Self {
      version:      1,
      timezone:     DEFAULT_TIMEZONE
        .to_string(),
      api:          ApiConfig::default(),
      toast:        ToastConfig::default(),
      temporal_nav:
        TemporalNavConfig::default()
    }
  }
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base: DEFAULT_API_BASE.to_string()
    }
  }
}

impl Default for ToastConfig {
  fn default() -> Self {
    Self {
      delay_ms: DEFAULT_TOAST_DELAY_MS
    }
  }
}

impl Default for TemporalNavConfig {
  fn default() -> Self {
    Self {
      mode:                NavMode::Pending,
      init:                InitStrategy::Reset,
      skip_body_classes:   vec![
        CALENDAR_PAGE_CLASS.to_string(),
      ],
      skip_path_prefixes:  vec![],
      legacy_reload_hooks:
        LEGACY_RELOAD_HOOKS
          .iter()
          .map(|name| name.to_string())
          .collect()
    }
  }
}

impl UiConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<Self>(raw)
        .context(
          "failed to parse ui config"
        )?;
    config.sanitize();
    Ok(config)
  }

  /// Parses the embedded document,
  /// logging and falling back to
  /// defaults when it is broken.
  pub fn load_embedded(raw: &str) -> Self {
    match Self::from_toml_str(raw) {
      | Ok(config) => {
        info!(
          version = config.version,
          timezone = %config.timezone,
          mode = ?config.temporal_nav.mode,
          init = ?config.temporal_nav.init,
          "loaded ui config"
        );
        config
      }
      | Err(error) => {
        tracing::error!(error = %format!("{error:#}"), "failed parsing ui config; using defaults");
        Self::default()
      }
    }
  }

  pub fn sanitize(&mut self) {
    if self.timezone.trim().is_empty()
    {
      self.timezone =
        DEFAULT_TIMEZONE.to_string();
    }

    let base = self
      .api
      .base
      .trim()
      .trim_end_matches('/')
      .to_string();
    self.api.base = if base.is_empty() {
      DEFAULT_API_BASE.to_string()
    } else {
      base
    };

    if self.toast.delay_ms == 0 {
      self.toast.delay_ms =
        DEFAULT_TOAST_DELAY_MS;
    }

    let nav = &mut self.temporal_nav;
    nav.skip_body_classes.retain(
      |class| !class.trim().is_empty()
    );
    nav.skip_path_prefixes.retain(
      |prefix| !prefix.trim().is_empty()
    );
    let mut seen = BTreeSet::new();
    nav.legacy_reload_hooks.retain(
      |name| {
        !name.trim().is_empty()
          && seen.insert(name.clone())
      }
    );
  }

  pub fn timezone(&self) -> Tz {
    match self.timezone.parse::<Tz>() {
      | Ok(tz) => tz,
      | Err(error) => {
        warn!(
          timezone = %self.timezone,
          %error,
          "invalid timezone in ui config; using default"
        );
        chrono_tz::America::Sao_Paulo
      }
    }
  }

  pub fn api_url(
    &self,
    path: &str
  ) -> String {
    format!(
      "{}/{}",
      self.api.base,
      path.trim_start_matches('/')
    )
  }

  /// Whether the navigation widget stays
  /// off on this page.
  pub fn skips_page(
    &self,
    body_classes: &[String],
    path: &str
  ) -> bool {
    let nav = &self.temporal_nav;
    body_classes.iter().any(|class| {
      nav
        .skip_body_classes
        .iter()
        .any(|skip| skip == class)
    }) || nav
      .skip_path_prefixes
      .iter()
      .any(|prefix| {
        path.starts_with(prefix.as_str())
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_yields_defaults() {
    let config =
      UiConfig::from_toml_str("")
        .expect("parse empty config");
    assert_eq!(config, UiConfig::default());
    assert_eq!(
      config.temporal_nav.legacy_reload_hooks,
      LEGACY_RELOAD_HOOKS
    );
  }

  #[test]
  fn sections_override_defaults() {
    let config = UiConfig::from_toml_str(
      r#"
timezone = "America/Manaus"

[api]
base = "/finance/api/"

[toast]
delay_ms = 5000

[temporal_nav]
mode = "immediate"
init = "restore"
skip_path_prefixes = ["/calendar"]
"#
    )
    .expect("parse config");

    assert_eq!(
      config.temporal_nav.mode,
      NavMode::Immediate
    );
    assert_eq!(
      config.temporal_nav.init,
      InitStrategy::Restore
    );
    assert_eq!(config.toast.delay_ms, 5000);
    assert_eq!(
      config.api_url("get-viewing-date"),
      "/finance/api/get-viewing-date"
    );
    assert_eq!(
      config.timezone(),
      chrono_tz::America::Manaus
    );
  }

  #[test]
  fn sanitize_restores_unusable_values() {
    let config = UiConfig::from_toml_str(
      r#"
timezone = " "

[api]
base = "  "

[toast]
delay_ms = 0

[temporal_nav]
legacy_reload_hooks = ["loadBills", "", "loadBills"]
"#
    )
    .expect("parse config");

    assert_eq!(config.timezone, DEFAULT_TIMEZONE);
    assert_eq!(config.api.base, DEFAULT_API_BASE);
    assert_eq!(
      config.toast.delay_ms,
      DEFAULT_TOAST_DELAY_MS
    );
    assert_eq!(
      config.temporal_nav.legacy_reload_hooks,
      vec!["loadBills".to_string()]
    );
  }

  #[test]
  fn unknown_mode_is_a_parse_error() {
    let result = UiConfig::from_toml_str(
      "[temporal_nav]\nmode = \"sometimes\"\n"
    );
    assert!(result.is_err());
    assert_eq!(
      UiConfig::load_embedded(
        "[temporal_nav]\nmode = \"sometimes\"\n"
      ),
      UiConfig::default()
    );
  }

  #[test]
  fn unknown_timezone_falls_back() {
    let config = UiConfig {
      timezone: "Mars/Olympus".to_string(),
      ..UiConfig::default()
    };
    assert_eq!(
      config.timezone(),
      chrono_tz::America::Sao_Paulo
    );
  }

  #[test]
  fn calendar_page_is_skipped_by_class_or_path()
  {
    let mut config = UiConfig::default();
    config
      .temporal_nav
      .skip_path_prefixes
      .push("/calendar".to_string());

    assert!(config.skips_page(
      &["container".to_string(), "calendar-page".to_string()],
      "/"
    ));
    assert!(config.skips_page(
      &[],
      "/calendar/month"
    ));
    assert!(!config.skips_page(
      &["dashboard-page".to_string()],
      "/invoices"
    ));
  }
}
