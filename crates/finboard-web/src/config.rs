use std::sync::OnceLock;

use chrono_tz::Tz;
use finboard_core::UiConfig;

const UI_CONFIG_TOML: &str =
  include_str!("../assets/finboard.toml");

pub fn ui_config() -> &'static UiConfig {
  static UI_CONFIG: OnceLock<UiConfig> =
    OnceLock::new();
  UI_CONFIG.get_or_init(|| {
    UiConfig::load_embedded(
      UI_CONFIG_TOML
    )
  })
}

pub fn ui_timezone() -> Tz {
  static UI_TZ: OnceLock<Tz> =
    OnceLock::new();
  *UI_TZ.get_or_init(|| {
    ui_config().timezone()
  })
}
