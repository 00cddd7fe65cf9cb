use serde::{
  Deserialize,
  Serialize
};

/// Session-held viewing date as returned by
/// `get-viewing-date` and `reset-viewing-date`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ViewingDateDto {
  pub viewing_month: u32,
  pub viewing_year:  i32,
  #[serde(default)]
  pub current_month: Option<u32>,
  #[serde(default)]
  pub current_year:  Option<i32>
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct SetViewingDateArgs {
  pub month: u32,
  pub year:  i32
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct SetViewingDateAck {
  #[serde(default)]
  pub success:       bool,
  #[serde(default)]
  pub viewing_month: Option<u32>,
  #[serde(default)]
  pub viewing_year:  Option<i32>
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ProjectedBalanceDto {
  #[serde(default)]
  pub current_balance:   f64,
  #[serde(default)]
  pub total_to_pay:      f64,
  #[serde(default)]
  pub projected_balance: f64
}

impl ProjectedBalanceDto {
  pub fn is_positive(&self) -> bool {
    self.projected_balance >= 0.0
  }
}

/// Body shape of a failed API call.
/// Routes report either `message` or
/// `error`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct ApiErrorBody {
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub error:   Option<String>
}

impl ApiErrorBody {
  pub fn server_message(
    &self
  ) -> Option<&str> {
    [
      self.message.as_deref(),
      self.error.as_deref()
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|msg| !msg.is_empty())
  }
}
