pub mod config;
pub mod debounce;
pub mod error;
pub mod format;
pub mod hooks;
pub mod nav;
pub mod period;
pub mod submit;

pub use config::UiConfig;
pub use error::{
  ApiError,
  ApiResult
};
pub use nav::{
  BalancePanel,
  CommitQueue,
  InitStrategy,
  NavCommand,
  NavMode,
  NavView,
  TemporalNav
};
pub use period::Period;

use chrono::{
  NaiveDate,
  Utc
};
use chrono_tz::Tz;

/// Today's date on the wall clock of
/// `tz`.
#[must_use]
pub fn today_in(tz: &Tz) -> NaiveDate {
  Utc::now()
    .with_timezone(tz)
    .date_naive()
}

/// Today's month, the reference for the
/// "not current month" alert.
#[must_use]
pub fn current_period(tz: &Tz) -> Period {
  Period::from_date(today_in(tz))
}
